//! Application builder: wires backends, services, and router into a server.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use sharebox_auth::JwtAuthProvider;
use sharebox_core::config::{AppConfig, DatabaseBackend};
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::traits::AuthProvider;
use sharebox_database::{DatabasePool, Repositories};
use sharebox_service::Services;
use sharebox_storage::build_blob_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Connect the configured backends and build the service graph.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let repos = match config.database.backend {
        DatabaseBackend::Postgres => {
            let db = DatabasePool::connect_and_migrate(&config.database).await?;
            Repositories::postgres(&db)
        }
        DatabaseBackend::Memory => {
            warn!("Using in-memory metadata store; data is lost on shutdown");
            Repositories::in_memory()
        }
    };

    let blobs = build_blob_store(&config.storage).await?;
    let auth: Arc<dyn AuthProvider> = Arc::new(JwtAuthProvider::new(&config.auth));
    let services = Services::new(repos, blobs.clone(), &config);

    Ok(AppState {
        config: Arc::new(config),
        services,
        auth,
        blobs,
    })
}

/// Serve the API until `shutdown` resolves.
pub async fn run_server<F>(state: AppState, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "ShareBox server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}
