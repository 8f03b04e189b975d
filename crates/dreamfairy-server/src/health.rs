use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; always answers `ok`
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
