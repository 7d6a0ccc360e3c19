//! Share grant repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_core::types::{GrantId, UserId};
use sharebox_entity::resource::ResourceRef;
use sharebox_entity::share::{CreateGrant, ShareGrant};

use crate::repositories::GrantRepository;

/// Grant CRUD and token lookup over the `share_grants` table.
#[derive(Debug, Clone)]
pub struct PgGrantRepository {
    pool: PgPool,
}

impl PgGrantRepository {
    /// Create a new grant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantRepository for PgGrantRepository {
    async fn find_by_id(&self, id: GrantId) -> AppResult<Option<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>("SELECT * FROM share_grants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find grant", e))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>(
            "SELECT * FROM share_grants WHERE public_token = $1 AND is_public = TRUE",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find grant by token", e))
    }

    async fn find_for_resource(&self, resource: ResourceRef) -> AppResult<Vec<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>(
            "SELECT * FROM share_grants WHERE resource_kind = $1 AND resource_id = $2 \
             ORDER BY created_at DESC",
        )
        .bind(resource.kind)
        .bind(resource.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list grants", e))
    }

    async fn find_for_target(
        &self,
        resource: ResourceRef,
        user: UserId,
    ) -> AppResult<Vec<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>(
            "SELECT * FROM share_grants \
             WHERE resource_kind = $1 AND resource_id = $2 AND target_user_id = $3 \
             AND is_public = FALSE",
        )
        .bind(resource.kind)
        .bind(resource.id)
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user grants", e))
    }

    async fn find_for_user(&self, user: UserId) -> AppResult<Vec<ShareGrant>> {
        sqlx::query_as::<_, ShareGrant>(
            "SELECT * FROM share_grants WHERE target_user_id = $1 AND is_public = FALSE \
             ORDER BY created_at DESC",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list grants for user", e)
        })
    }

    async fn create(&self, data: &CreateGrant) -> AppResult<ShareGrant> {
        let grant = ShareGrant::from_create(data.clone());
        sqlx::query_as::<_, ShareGrant>(
            "INSERT INTO share_grants \
             (id, resource_id, resource_kind, target_user_id, permission, is_public, \
              public_token, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(grant.id)
        .bind(grant.resource_id)
        .bind(grant.resource_kind)
        .bind(grant.target_user_id)
        .bind(grant.permission)
        .bind(grant.is_public)
        .bind(&grant.public_token)
        .bind(grant.expires_at)
        .bind(grant.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                AppError::with_source(ErrorKind::Conflict, "Public token already in use", e)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create grant", e)
            }
        })
    }

    async fn delete(&self, id: GrantId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM share_grants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete grant", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_resource(&self, resource: ResourceRef) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM share_grants WHERE resource_kind = $1 AND resource_id = $2")
                .bind(resource.kind)
                .bind(resource.id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to revoke grants", e)
                })?;
        Ok(result.rows_affected())
    }
}
