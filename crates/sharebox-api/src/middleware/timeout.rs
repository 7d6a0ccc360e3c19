//! Per-request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::logging::loggable_path;
use crate::state::AppState;

/// Fails requests that run longer than `server.request_timeout_seconds`.
pub async fn request_timeout(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limit = Duration::from_secs(state.config.server.request_timeout_seconds);
    let path = loggable_path(request.uri().path()).to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(path = %path, timeout_secs = limit.as_secs(), "Request timed out");
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}
