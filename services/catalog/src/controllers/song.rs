use std::sync::Arc;

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    db::SongStore,
    error::SongError,
    models::{ListSongsQuery, SongDraft, SongPatch},
};

#[derive(Clone)]
pub struct SongController {
    store: Arc<dyn SongStore>,
}

impl SongController {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        SongController { store }
    }

    fn failure(status: StatusCode, message: &str, err: SongError) -> Response {
        if err.is_client_error() {
            warn!("{}: {}", message, err);
        } else {
            error!("{}: {}", message, err);
        }
        (
            status,
            Json(json!({ "message": message, "error": err.to_json() })),
        )
            .into_response()
    }

    pub async fn create_song(&self, draft: Result<SongDraft, SongError>) -> Response {
        let created = match draft {
            Ok(draft) => self.store.create(draft).await,
            Err(e) => Err(e),
        };
        match created {
            Ok(song) => {
                info!("created song {}", song.id);
                (StatusCode::CREATED, Json(song)).into_response()
            }
            Err(e) => Self::failure(StatusCode::BAD_REQUEST, "Error creating song", e),
        }
    }

    pub async fn list_songs(&self, query: Result<ListSongsQuery, SongError>) -> Response {
        let songs = match query {
            Ok(query) => self.store.find_all(query.genre()).await,
            Err(e) => Err(e),
        };
        match songs {
            Ok(songs) => (StatusCode::OK, Json(songs)).into_response(),
            Err(e) => Self::failure(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching songs", e),
        }
    }

    pub async fn update_song(&self, id: &str, patch: Result<SongPatch, SongError>) -> Response {
        let updated = match patch {
            Ok(patch) => self.store.update_by_id(id, patch).await,
            Err(e) => Err(e),
        };
        match updated {
            Ok(song) => {
                info!("updated song {}", song.id);
                (StatusCode::OK, Json(song)).into_response()
            }
            Err(e) => Self::failure(StatusCode::BAD_REQUEST, "Error updating song", e),
        }
    }

    pub async fn delete_song(&self, id: &str) -> Response {
        match self.store.delete_by_id(id).await {
            Ok(removed) => {
                info!("delete song {} (removed: {})", id, removed);
                (
                    StatusCode::OK,
                    Json(json!({ "message": "Song deleted successfully" })),
                )
                    .into_response()
            }
            Err(e) => Self::failure(StatusCode::BAD_REQUEST, "Error deleting song", e),
        }
    }

    pub async fn song_stats(&self) -> Response {
        match self.store.aggregate_statistics().await {
            Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
            Err(e) => Self::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error fetching statistics",
                e,
            ),
        }
    }
}
