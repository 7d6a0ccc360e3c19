//! In-memory blob store.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::traits::BlobStore;

/// Blobs held in a concurrent map; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Bytes>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Whether a blob is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.blobs.contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, data: Bytes) -> AppResult<String> {
        let key = crate::new_key();
        self.blobs.insert(key.clone(), data);
        Ok(key)
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.blobs
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {key}")))
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.remove(key).is_some())
    }
}
