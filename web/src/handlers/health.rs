//! Health check endpoint.

use axum::http::StatusCode;

/// Simple liveness check; checks no dependencies.
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
