//! Route handlers organized by domain.

pub mod file;
pub mod folder;
pub mod health;
pub mod public;
pub mod share;

use std::future::Future;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;

use crate::error::ApiResult;

/// Run `work` on its own task and wait for it.
///
/// The task keeps running if the request future is dropped.
pub(crate) async fn run_to_completion<T, F>(work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: Future<Output = AppResult<T>> + Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| AppError::internal(format!("Background task failed: {e}")))?
        .map_err(Into::into)
}
