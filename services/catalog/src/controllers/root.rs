use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub struct RootController;

impl RootController {
    pub async fn root() -> Response {
        (
            StatusCode::OK,
            Json(json!({
                "service": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
            .into_response()
    }

    pub async fn health_check() -> Response {
        (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
    }
}
