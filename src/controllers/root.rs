use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::db::Database;

pub struct RootController;

impl RootController {
    pub async fn root() -> Response {
        (StatusCode::OK, "muslib song library").into_response()
    }

    /// Reports whether the database answers a trivial query.
    pub async fn health_check(database: &Database) -> Response {
        match sqlx::query("SELECT 1").execute(database.pool()).await {
            Ok(_) => (
                StatusCode::OK,
                Json(serde_json::json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") })),
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({ "status": "unavailable" })),
                )
                    .into_response()
            }
        }
    }
}
