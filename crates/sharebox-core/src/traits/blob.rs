//! Byte-level persistence of file contents.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Opaque content store addressed by generated keys.
///
/// The metadata layer never builds keys itself: [`BlobStore::put`] returns
/// the key under which the bytes were stored, and that key is recorded on
/// the file record. Implementations live in `sharebox-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name (e.g. `"local"`, `"memory"`).
    fn backend_name(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under a freshly generated key and return the key.
    async fn put(&self, data: Bytes) -> AppResult<String>;

    /// Read the bytes stored under `key`. Missing keys fail with `NotFound`.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Remove the bytes stored under `key`.
    ///
    /// Returns `false` when nothing was stored under the key.
    async fn delete(&self, key: &str) -> AppResult<bool>;
}
