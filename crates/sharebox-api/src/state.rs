//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sharebox_core::config::AppConfig;
use sharebox_core::traits::{AuthProvider, BlobStore};
use sharebox_service::Services;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Business services
    pub services: Services,
    /// Resolves bearer credentials to a user
    pub auth: Arc<dyn AuthProvider>,
    /// Content store, kept for health reporting
    pub blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.services)
            .field("blobs", &self.blobs)
            .finish_non_exhaustive()
    }
}
