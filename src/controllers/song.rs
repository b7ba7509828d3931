use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    db::Database,
    models::song::SongField,
};

pub struct SongController {
    database: Database,
}

impl SongController {
    pub fn new(database: Database) -> Self {
        SongController { database }
    }

    pub async fn list_songs(&self) -> Response {
        match self.database.list_all().await {
            Ok(songs) => (StatusCode::OK, Json(songs)).into_response(),
            Err(e) => e.into_response(),
        }
    }

    pub async fn list_songs_by(&self, field: &str, value: &str) -> Response {
        let field: SongField = match field.parse() {
            Ok(f) => f,
            Err(e) => {
                warn!("Rejected filter on {:?}", field);
                return e.into_response();
            }
        };
        match self.database.list_by(field, value).await {
            Ok(songs) => (StatusCode::OK, Json(songs)).into_response(),
            Err(e) => e.into_response(),
        }
    }

    pub async fn get_song(&self, group: &str, song: &str) -> Response {
        match self.database.get_one(group, song).await {
            Ok(found) => (StatusCode::OK, Json(found)).into_response(),
            Err(e) => e.into_response(),
        }
    }

    pub async fn create_song(&self, group: &str, song: &str, release_date: Option<String>) -> Response {
        let release_date = release_date.unwrap_or_default();
        match self.database.create(group, song, &release_date).await {
            Ok((created, true)) => {
                info!("Created song {} - {}", group, song);
                (StatusCode::CREATED, Json(created)).into_response()
            }
            Ok((existing, false)) => (StatusCode::OK, Json(existing)).into_response(),
            Err(e) => e.into_response(),
        }
    }

    pub async fn update_song(&self, group: &str, song: &str, field: &str, value: &str) -> Response {
        let field: SongField = match field.parse() {
            Ok(f) => f,
            Err(e) => {
                warn!("Rejected update of {:?}", field);
                return e.into_response();
            }
        };
        match self.database.update(group, song, field, value).await {
            Ok(updated) => {
                info!("Updated {} of {} - {}", field, group, song);
                (StatusCode::OK, Json(updated)).into_response()
            }
            Err(e) => e.into_response(),
        }
    }

    pub async fn delete_song(&self, group: &str, song: &str) -> Response {
        match self.database.remove(group, song).await {
            Ok(deleted) => {
                info!("Deleted {} row(s) for {} - {}", deleted, group, song);
                (StatusCode::OK, Json(serde_json::json!({ "deleted": deleted }))).into_response()
            }
            Err(e) => e.into_response(),
        }
    }
}
