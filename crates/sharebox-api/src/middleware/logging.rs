//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Span, info};

/// Logs request method, path, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    let path = loggable_path(uri.path());

    info!(
        method = %method,
        path = %path,
        status = %status.as_u16(),
        duration_ms = %duration.as_millis(),
        "HTTP request"
    );

    response
}

/// Span for `TraceLayer`, carrying the method and the masked path only.
pub fn request_span(request: &Request) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %loggable_path(request.uri().path()),
    )
}

/// Request path with public-link tokens masked.
///
/// Public tokens are bearer secrets and must never reach the logs.
pub(crate) fn loggable_path(path: &str) -> &str {
    if path.starts_with("/api/public/share/") {
        "/api/public/share/{token}"
    } else {
        path
    }
}
