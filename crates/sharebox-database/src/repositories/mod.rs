//! Repository traits and their PostgreSQL and in-memory implementations.
//!
//! Services depend only on the traits. Every method is a single atomic
//! operation against the store; multi-step consistency is the caller's job.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use sharebox_core::result::AppResult;
use sharebox_core::types::{FileId, FolderId, GrantId, UserId};
use sharebox_entity::file::{CreateFile, File};
use sharebox_entity::folder::{CreateFolder, Folder};
use sharebox_entity::resource::ResourceRef;
use sharebox_entity::share::{CreateGrant, ShareGrant};

use crate::connection::DatabasePool;

/// Folder rows.
#[async_trait]
pub trait FolderRepository: Send + Sync + 'static {
    /// Find a folder by ID regardless of owner.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Find a folder by ID only if `owner` owns it.
    async fn find_by_id_and_owner(&self, id: FolderId, owner: UserId)
    -> AppResult<Option<Folder>>;

    /// Folders of `owner` whose parent is `parent` (top level when `None`), ordered by name.
    async fn find_children(&self, owner: UserId, parent: Option<FolderId>)
    -> AppResult<Vec<Folder>>;

    /// Insert a new folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Persist `name` and `parent_id` of an existing folder in one write.
    ///
    /// Fails with `NotFound` if the row no longer exists.
    async fn update(&self, folder: &Folder) -> AppResult<Folder>;

    /// Delete a folder row. Returns `true` if a row was removed.
    async fn delete(&self, id: FolderId) -> AppResult<bool>;
}

/// File rows.
#[async_trait]
pub trait FileRepository: Send + Sync + 'static {
    /// Find a file by ID regardless of owner.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Find a file by ID only if `owner` owns it.
    async fn find_by_id_and_owner(&self, id: FileId, owner: UserId) -> AppResult<Option<File>>;

    /// Files of `owner` directly inside `folder` (top level when `None`), ordered by name.
    async fn find_in_folder(&self, owner: UserId, folder: Option<FolderId>)
    -> AppResult<Vec<File>>;

    /// Insert a new file record.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Persist `name` and `folder_id` of an existing file in one write.
    async fn update(&self, file: &File) -> AppResult<File>;

    /// Delete a file row. Returns `true` if a row was removed.
    async fn delete(&self, id: FileId) -> AppResult<bool>;
}

/// Share grant rows.
#[async_trait]
pub trait GrantRepository: Send + Sync + 'static {
    /// Find a grant by ID.
    async fn find_by_id(&self, id: GrantId) -> AppResult<Option<ShareGrant>>;

    /// Find the public grant holding `token`.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareGrant>>;

    /// All grants on a resource, newest first.
    async fn find_for_resource(&self, resource: ResourceRef) -> AppResult<Vec<ShareGrant>>;

    /// Targeted (non-public) grants on `resource` for `user`.
    async fn find_for_target(
        &self,
        resource: ResourceRef,
        user: UserId,
    ) -> AppResult<Vec<ShareGrant>>;

    /// Targeted grants naming `user` across all resources, newest first.
    async fn find_for_user(&self, user: UserId) -> AppResult<Vec<ShareGrant>>;

    /// Insert a new grant. A duplicate public token fails with `Conflict`.
    async fn create(&self, data: &CreateGrant) -> AppResult<ShareGrant>;

    /// Delete one grant. Returns `true` if a row was removed.
    async fn delete(&self, id: GrantId) -> AppResult<bool>;

    /// Delete every grant on a resource and return how many were removed.
    async fn delete_for_resource(&self, resource: ResourceRef) -> AppResult<u64>;
}

/// The repository set handed to the service layer.
#[derive(Clone)]
pub struct Repositories {
    /// Folder rows.
    pub folders: Arc<dyn FolderRepository>,
    /// File rows.
    pub files: Arc<dyn FileRepository>,
    /// Grant rows.
    pub grants: Arc<dyn GrantRepository>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            folders: Arc::new(postgres::PgFolderRepository::new(pool.clone())),
            files: Arc::new(postgres::PgFileRepository::new(pool.clone())),
            grants: Arc::new(postgres::PgGrantRepository::new(pool)),
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            folders: Arc::new(memory::MemoryFolderRepository::default()),
            files: Arc::new(memory::MemoryFileRepository::default()),
            grants: Arc::new(memory::MemoryGrantRepository::default()),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
