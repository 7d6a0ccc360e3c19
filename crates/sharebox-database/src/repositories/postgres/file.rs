//! File repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_core::types::{FileId, FolderId, UserId};
use sharebox_entity::file::{CreateFile, File};

use crate::repositories::FileRepository;

/// File record CRUD over the `files` table.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_id_and_owner(&self, id: FileId, owner: UserId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_in_folder(
        &self,
        owner: UserId,
        folder: Option<FolderId>,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND folder_id IS NOT DISTINCT FROM $2 \
             ORDER BY name ASC, created_at ASC",
        )
        .bind(owner)
        .bind(folder)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let file = File::from_create(data.clone());
        sqlx::query_as::<_, File>(
            "INSERT INTO files \
             (id, storage_key, name, content_type, size_bytes, owner_id, folder_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(file.id)
        .bind(&file.storage_key)
        .bind(&file.name)
        .bind(&file.content_type)
        .bind(file.size_bytes)
        .bind(file.owner_id)
        .bind(file.folder_id)
        .bind(file.created_at)
        .bind(file.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    async fn update(&self, file: &File) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $2, folder_id = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(file.id)
        .bind(&file.name)
        .bind(file.folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {} not found", file.id)))
    }

    async fn delete(&self, id: FileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}
