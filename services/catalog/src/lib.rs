//! Song catalog REST service.
//!
//! `build_router` wires the `/api/songs` routes to a [`db::SongStore`]
//! backend chosen by the caller.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod routers;
pub mod secrets;

use controllers::SongController;
use db::SongStore;
use routers::song::{create_song_route, list_songs_route};
use routers::{health_check_route, root_route, song_routes};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub songs: SongController,
}

impl AppState {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        Self {
            songs: SongController::new(store),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .nest("/api/songs", song_routes())
        // The nested `/` only matches `/api/songs`; accept the trailing slash too
        .route("/api/songs/", get(list_songs_route).post(create_song_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
