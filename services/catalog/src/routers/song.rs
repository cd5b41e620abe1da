use axum::{
    Router,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::Response,
    routing::get,
};

use crate::{
    AppState,
    error::SongError,
    models::{ListSongsQuery, SongDraft, SongPatch},
};

// A body that is not valid JSON is a validation failure of the route, not a
// framework rejection.
fn decode_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, SongError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| SongError::Validation(rejection.body_text()))
}

pub async fn create_song_route(
    State(state): State<AppState>,
    body: Result<Json<SongDraft>, JsonRejection>,
) -> Response {
    state.songs.create_song(decode_body(body)).await
}

// Raw pairs rather than a struct so `?genre=a&genre=b` is not a duplicate
// field error.
pub async fn list_songs_route(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = query
        .map(|Query(pairs)| ListSongsQuery::from_pairs(pairs))
        .map_err(|rejection| SongError::Validation(rejection.body_text()));
    state.songs.list_songs(query).await
}

pub async fn update_song_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<SongPatch>, JsonRejection>,
) -> Response {
    state.songs.update_song(&id, decode_body(body)).await
}

pub async fn delete_song_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    state.songs.delete_song(&id).await
}

// `/stats` is a static segment, so writes to it never reach the `/{id}`
// handlers. It is still just a malformed id for them.
const STATS_SEGMENT: &str = "stats";

pub async fn update_stats_route(
    State(state): State<AppState>,
    body: Result<Json<SongPatch>, JsonRejection>,
) -> Response {
    state.songs.update_song(STATS_SEGMENT, decode_body(body)).await
}

pub async fn delete_stats_route(State(state): State<AppState>) -> Response {
    state.songs.delete_song(STATS_SEGMENT).await
}

pub async fn song_stats_route(State(state): State<AppState>) -> Response {
    state.songs.song_stats().await
}

/// Mounted at `/api/songs`. `/stats` goes before `/{id}`.
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/stats",
            get(song_stats_route)
                .put(update_stats_route)
                .delete(delete_stats_route),
        )
        .route("/", get(list_songs_route).post(create_song_route))
        .route("/{id}", axum::routing::put(update_song_route).delete(delete_song_route))
}
