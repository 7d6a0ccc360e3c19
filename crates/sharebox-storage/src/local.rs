//! Local filesystem blob store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_core::traits::BlobStore;

/// Blobs stored as files under a root directory, fanned out by key prefix.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Map a key to its on-disk path. Keys never contain path components.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let valid = key.len() >= 2 && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(AppError::validation(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.root.join(&key[..2]).join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn backend_name(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, data: Bytes) -> AppResult<String> {
        let key = crate::new_key();
        let path = self.resolve(&key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let partial = path.with_extension("partial");
        fs::write(&partial, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write blob: {key}"), e)
        })?;
        fs::rename(&partial, &path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to commit blob: {key}"), e)
        })?;

        debug!(key = %key, bytes = data.len(), "Stored blob");
        Ok(key)
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let path = self.resolve(key)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to read blob: {key}"), e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Deleted blob");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {key}"),
                e,
            )),
        }
    }
}
