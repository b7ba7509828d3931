use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use crate::controllers::{SongController, song_page};
use crate::db::Database;
use crate::models::song::CreateSongQuery;

pub async fn list_songs_route(State(database): State<Database>) -> Response {
    SongController::new(database).list_songs().await
}

pub async fn search_songs_route(
    State(database): State<Database>,
    Path((field, value)): Path<(String, String)>,
) -> Response {
    SongController::new(database).list_songs_by(&field, &value).await
}

pub async fn get_song_route(
    State(database): State<Database>,
    Path((group, song)): Path<(String, String)>,
) -> Response {
    SongController::new(database).get_song(&group, &song).await
}

pub async fn create_song_route(
    State(database): State<Database>,
    Path((group, song)): Path<(String, String)>,
    Query(query): Query<CreateSongQuery>,
) -> Response {
    SongController::new(database)
        .create_song(&group, &song, query.release_date)
        .await
}

pub async fn update_song_route(
    State(database): State<Database>,
    Path((group, song, field, value)): Path<(String, String, String, String)>,
) -> Response {
    SongController::new(database)
        .update_song(&group, &song, &field, &value)
        .await
}

pub async fn delete_song_route(
    State(database): State<Database>,
    Path((group, song)): Path<(String, String)>,
) -> Response {
    SongController::new(database).delete_song(&group, &song).await
}

pub async fn song_page_route(
    State(database): State<Database>,
    Path((group, song)): Path<(String, String)>,
) -> Response {
    song_page(&database, &group, &song).await
}
