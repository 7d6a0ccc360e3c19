//! Route definitions for the ShareBox HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(share_routes())
        .merge(public_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::timeout::request_timeout,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(middleware::logging::request_span))
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder CRUD and tree
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_children).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::rename_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
        .route(
            "/folders/{id}/breadcrumbs",
            get(handlers::folder::breadcrumbs),
        )
}

/// File upload, metadata, download
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::upload_file))
        .route(
            "/files/{id}",
            get(handlers::file::get_file)
                .put(handlers::file::rename_file)
                .delete(handlers::file::delete_file),
        )
        .route("/files/{id}/download", get(handlers::file::download_file))
        .route("/files/{id}/move", put(handlers::file::move_file))
}

/// Share management
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shares/shared-with-me",
            get(handlers::share::shared_with_me),
        )
        .route(
            "/shares/grants/{grant_id}",
            axum::routing::delete(handlers::share::revoke_share),
        )
        .route(
            "/shares/{kind}/{id}",
            get(handlers::share::list_shares).post(handlers::share::create_share),
        )
}

/// Anonymous public-link access
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/public/share/{token}", get(handlers::public::open_share))
        .route(
            "/public/share/{token}/download",
            get(handlers::public::download_share),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
