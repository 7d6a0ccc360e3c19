//! # sharebox-storage
//!
//! [`BlobStore`] implementations for ShareBox: a local filesystem store
//! and an in-memory store.

pub mod local;
pub mod memory;

use std::sync::Arc;

use sharebox_core::config::{StorageBackend, StorageConfig};
use sharebox_core::result::AppResult;
use sharebox_core::traits::BlobStore;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

/// Build the blob store selected by configuration.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.backend {
        StorageBackend::Local => Arc::new(LocalBlobStore::new(&config.local.root_path).await?),
        StorageBackend::Memory => Arc::new(MemoryBlobStore::new()),
    };
    tracing::info!(backend = store.backend_name(), "Blob store ready");
    Ok(store)
}

/// Generate a fresh storage key.
pub(crate) fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
