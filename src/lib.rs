//! Song metadata service: a small store of songs (group, title, release
//! date, lyrics, link) behind a JSON API and an HTML page view.

use std::time::Duration;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod controllers;
pub mod db;
pub mod error;
pub mod lyrics;
pub mod models;
pub mod routers;
pub mod secrets;

pub use db::Database;
pub use error::StoreError;

use routers::{
    create_song_route, delete_song_route, get_song_route, health_check_route, list_songs_route,
    root_route, search_songs_route, song_page_route, update_song_route,
};

/// Builds the application router around an already connected store.
pub fn build_router(database: Database, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Core routes
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        // Song API
        .route("/muslib", get(list_songs_route))
        .route(
            "/muslib/{group}/{song}",
            get(get_song_route)
                .post(create_song_route)
                .delete(delete_song_route),
        )
        .route("/muslib/{group}/{song}/{field}/{value}", put(update_song_route))
        .route("/search/{field}/{value}", get(search_songs_route))
        // HTML view
        .route("/page/{group}/{song}", get(song_page_route))
        // Middleware
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(database)
}
