//! Error type shared by the song store and the HTTP layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// No record matches the lookup key
    #[error("No such song")]
    NotFound,

    /// Field name outside the allow-list
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Link payload is not url-safe base64 text
    #[error("Invalid link encoding: {0}")]
    Decode(String),

    /// The row changed between the read and the write of an update
    #[error("Song was modified concurrently, retry the update")]
    Conflict,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::UnknownField(_) | StoreError::Decode(_) => StatusCode::BAD_REQUEST,
            StoreError::Conflict => StatusCode::CONFLICT,
            StoreError::Database(_) | StoreError::Migrate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("Store failure: {}", self);
            "Failed to access song storage".to_string()
        } else {
            self.to_string()
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: StoreError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn maps_each_kind_to_a_status() {
        assert_eq!(StoreError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            StoreError::UnknownField("id".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StoreError::Decode("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(StoreError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            StoreError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn conflict_body_tells_client_to_retry() {
        let (status, body) = body_json(StoreError::Conflict).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("retry"));
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let (status, body) = body_json(StoreError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to access song storage");
    }

    #[tokio::test]
    async fn client_errors_carry_the_message() {
        let (status, body) = body_json(StoreError::UnknownField("rating".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown field: rating");
    }
}
