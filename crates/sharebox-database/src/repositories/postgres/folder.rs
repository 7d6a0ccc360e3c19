//! Folder repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_core::types::{FolderId, UserId};
use sharebox_entity::folder::{CreateFolder, Folder};

use crate::repositories::FolderRepository;

/// Folder CRUD over the `folders` table.
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_id_and_owner(
        &self,
        id: FolderId,
        owner: UserId,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_children(
        &self,
        owner: UserId,
        parent: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
             ORDER BY name ASC, created_at ASC",
        )
        .bind(owner)
        .bind(parent)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let folder = Folder::from_create(data.clone());
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, owner_id, parent_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.owner_id)
        .bind(folder.parent_id)
        .bind(folder.created_at)
        .bind(folder.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, parent_id = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;
        Ok(result.rows_affected() > 0)
    }
}
