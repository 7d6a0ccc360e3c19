//! Shared fixtures for service-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use sharebox_core::config::AppConfig;
use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::traits::BlobStore;
use sharebox_core::types::{FolderId, UserId};
use sharebox_database::Repositories;
use sharebox_entity::file::File;
use sharebox_entity::folder::Folder;
use sharebox_service::{RequestContext, Services, UploadFile};
use sharebox_storage::MemoryBlobStore;

/// Services over fresh in-memory repositories and blob store.
pub struct TestEnv {
    /// The service graph under test.
    pub services: Services,
    /// Direct repository access for residue checks.
    pub repos: Repositories,
    /// The blob store the services write to.
    pub blobs: Arc<dyn BlobStore>,
}

impl TestEnv {
    /// Default configuration, in-memory blob store.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Custom configuration, in-memory blob store.
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, Arc::new(MemoryBlobStore::new()))
    }

    /// Default configuration over a caller-supplied blob store.
    pub fn with_blob_store(blobs: Arc<dyn BlobStore>) -> Self {
        Self::build(AppConfig::default(), blobs)
    }

    fn build(config: AppConfig, blobs: Arc<dyn BlobStore>) -> Self {
        let repos = Repositories::in_memory();
        let services = Services::new(repos.clone(), blobs.clone(), &config);
        Self {
            services,
            repos,
            blobs,
        }
    }

    /// Create a folder as `ctx`, panicking on failure.
    pub async fn folder(&self, ctx: &RequestContext, name: &str, parent: Option<FolderId>) -> Folder {
        self.services
            .tree
            .create_folder(ctx, name, parent)
            .await
            .expect("create folder")
    }

    /// Upload a small text file as `ctx`, panicking on failure.
    pub async fn file(&self, ctx: &RequestContext, name: &str, folder: Option<FolderId>) -> File {
        self.services
            .tree
            .upload_file(
                ctx,
                UploadFile {
                    folder_id: folder,
                    name: name.to_string(),
                    content_type: Some("text/plain".to_string()),
                    data: Bytes::from(format!("contents of {name}")),
                },
            )
            .await
            .expect("upload file")
    }
}

/// A context for a brand-new user.
pub fn new_user() -> RequestContext {
    RequestContext::new(UserId::new())
}

/// Blob store whose deletes always fail.
#[derive(Debug, Default)]
pub struct FailingDeleteStore {
    inner: MemoryBlobStore,
}

#[async_trait]
impl BlobStore for FailingDeleteStore {
    fn backend_name(&self) -> &str {
        "failing-delete"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, data: Bytes) -> AppResult<String> {
        self.inner.put(data).await
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.inner.get(key).await
    }

    async fn delete(&self, _key: &str) -> AppResult<bool> {
        Err(AppError::storage("disk unavailable"))
    }
}
