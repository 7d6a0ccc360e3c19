//! Sharing grants: targeted-user grants and expiring public links.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sharebox_core::config::SharingConfig;
use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_core::types::{GrantId, UserId};
use sharebox_database::GrantRepository;
use sharebox_entity::resource::ResourceRef;
use sharebox_entity::share::{CreateGrant, PermissionLevel, ShareGrant};

use super::token::generate_token;

/// Attempts at drawing an unused public token before giving up.
const TOKEN_ATTEMPTS: usize = 5;

/// Parameters of a new grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRequest {
    /// Grantee. Must be set for targeted grants and absent for public links.
    pub target_user_id: Option<UserId>,
    /// Level granted.
    pub permission: PermissionLevel,
    /// Create a public link instead of a targeted grant.
    pub is_public_link: bool,
    /// When the grant stops being valid.
    pub expires_at: Option<DateTime<Utc>>,
}

impl GrantRequest {
    /// A targeted grant for `user`.
    pub fn user(user: UserId, permission: PermissionLevel) -> Self {
        Self {
            target_user_id: Some(user),
            permission,
            is_public_link: false,
            expires_at: None,
        }
    }

    /// A read-only public link.
    pub fn public_link(expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            target_user_id: None,
            permission: PermissionLevel::Read,
            is_public_link: true,
            expires_at,
        }
    }
}

/// Owns every [`ShareGrant`] and answers grant lookups.
pub struct PermissionRegistry {
    grants: Arc<dyn GrantRepository>,
    config: SharingConfig,
}

impl std::fmt::Debug for PermissionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionRegistry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PermissionRegistry {
    /// Creates a new registry.
    pub fn new(grants: Arc<dyn GrantRepository>, config: SharingConfig) -> Self {
        Self { grants, config }
    }

    /// Whether READ and EDIT grants are told apart on write access.
    pub fn levels_enforced(&self) -> bool {
        self.config.enforce_permission_levels
    }

    /// Record a new grant on `resource`.
    ///
    /// Public grants receive a fresh random token that no other grant holds.
    pub async fn grant(&self, resource: ResourceRef, request: GrantRequest) -> AppResult<ShareGrant> {
        match (request.is_public_link, request.target_user_id) {
            (true, Some(_)) => {
                return Err(AppError::validation(
                    "A public link cannot name a target user",
                ));
            }
            (false, None) => {
                return Err(AppError::validation(
                    "A targeted share requires a target user",
                ));
            }
            _ => {}
        }

        if !request.is_public_link {
            let grant = self
                .grants
                .create(&CreateGrant {
                    resource,
                    target_user_id: request.target_user_id,
                    permission: request.permission,
                    public_token: None,
                    expires_at: request.expires_at,
                })
                .await?;
            info!(
                grant_id = %grant.id,
                resource = %resource,
                permission = %grant.permission,
                "User grant created"
            );
            return Ok(grant);
        }

        for attempt in 1..=TOKEN_ATTEMPTS {
            let data = CreateGrant {
                resource,
                target_user_id: None,
                permission: request.permission,
                public_token: Some(generate_token(self.config.token_bytes)),
                expires_at: request.expires_at,
            };
            match self.grants.create(&data).await {
                Ok(grant) => {
                    info!(
                        grant_id = %grant.id,
                        resource = %resource,
                        expires_at = ?grant.expires_at,
                        "Public link created"
                    );
                    return Ok(grant);
                }
                Err(e) if e.is(ErrorKind::Conflict) => {
                    warn!(attempt, "Public token collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal("Could not allocate a unique public token"))
    }

    /// Look up the public grant for `token`, valid at `now`.
    ///
    /// Fails with `ExpiredOrInvalidLink` when no public grant holds the token
    /// or its expiration is at or before `now`.
    pub async fn resolve_public_link(&self, token: &str, now: DateTime<Utc>) -> AppResult<ShareGrant> {
        let grant = self
            .grants
            .find_by_token(token)
            .await?
            .filter(|g| g.is_public)
            .ok_or_else(|| AppError::expired_or_invalid_link("Share link is invalid or expired"))?;

        if grant.is_expired_at(now) {
            warn!(grant_id = %grant.id, "Expired public link presented");
            return Err(AppError::expired_or_invalid_link(
                "Share link is invalid or expired",
            ));
        }

        Ok(grant)
    }

    /// Whether `user` holds a targeted grant on `resource`.
    pub async fn user_has_access(&self, resource: ResourceRef, user: UserId) -> AppResult<bool> {
        Ok(self.user_permission(resource, user).await?.is_some())
    }

    /// Strongest level `user` holds on `resource` through targeted grants.
    pub async fn user_permission(
        &self,
        resource: ResourceRef,
        user: UserId,
    ) -> AppResult<Option<PermissionLevel>> {
        let now = Utc::now();
        Ok(self
            .grants
            .find_for_target(resource, user)
            .await?
            .into_iter()
            .filter(|g| !self.config.expire_user_grants || !g.is_expired_at(now))
            .map(|g| g.permission)
            .max())
    }

    /// Fetch one grant.
    pub async fn get(&self, id: GrantId) -> AppResult<ShareGrant> {
        self.grants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Share {id} not found")))
    }

    /// All grants on `resource`, newest first.
    pub async fn list_grants(&self, resource: ResourceRef) -> AppResult<Vec<ShareGrant>> {
        self.grants.find_for_resource(resource).await
    }

    /// Targeted grants naming `user`, newest first.
    pub async fn list_shared_with(&self, user: UserId) -> AppResult<Vec<ShareGrant>> {
        let now = Utc::now();
        Ok(self
            .grants
            .find_for_user(user)
            .await?
            .into_iter()
            .filter(|g| !self.config.expire_user_grants || !g.is_expired_at(now))
            .collect())
    }

    /// Remove one grant. Returns `false` if it was already gone.
    pub async fn revoke(&self, id: GrantId) -> AppResult<bool> {
        let removed = self.grants.delete(id).await?;
        if removed {
            info!(grant_id = %id, "Grant revoked");
        }
        Ok(removed)
    }

    /// Remove every grant on `resource` and return how many were removed.
    pub async fn revoke_all_for_resource(&self, resource: ResourceRef) -> AppResult<u64> {
        self.grants.delete_for_resource(resource).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sharebox_core::types::{FileId, FolderId};
    use sharebox_database::Repositories;

    use super::*;

    fn registry(config: SharingConfig) -> PermissionRegistry {
        PermissionRegistry::new(Repositories::in_memory().grants, config)
    }

    #[tokio::test]
    async fn test_public_link_rejects_target_user() {
        let reg = registry(SharingConfig::default());
        let mut request = GrantRequest::public_link(None);
        request.target_user_id = Some(UserId::new());

        let err = reg
            .grant(ResourceRef::folder(FolderId::new()), request)
            .await
            .expect_err("invalid");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_targeted_grant_requires_user() {
        let reg = registry(SharingConfig::default());
        let request = GrantRequest {
            target_user_id: None,
            permission: PermissionLevel::Read,
            is_public_link: false,
            expires_at: None,
        };
        let err = reg
            .grant(ResourceRef::file(FileId::new()), request)
            .await
            .expect_err("invalid");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_public_link_expiry_boundary() {
        let reg = registry(SharingConfig::default());
        let expires = Utc::now() + Duration::hours(1);
        let grant = reg
            .grant(
                ResourceRef::folder(FolderId::new()),
                GrantRequest::public_link(Some(expires)),
            )
            .await
            .expect("grant");
        let token = grant.public_token.clone().expect("token");

        let before = expires - Duration::milliseconds(1);
        assert_eq!(reg.resolve_public_link(&token, before).await.expect("valid").id, grant.id);

        for at in [expires, expires + Duration::seconds(1)] {
            let err = reg.resolve_public_link(&token, at).await.expect_err("expired");
            assert_eq!(err.kind, ErrorKind::ExpiredOrInvalidLink);
        }
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        let reg = registry(SharingConfig::default());
        let err = reg
            .resolve_public_link("no-such-token", Utc::now())
            .await
            .expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::ExpiredOrInvalidLink);
    }

    #[tokio::test]
    async fn test_user_access_ignores_expiry_by_default() {
        let reg = registry(SharingConfig::default());
        let file = ResourceRef::file(FileId::new());
        let user = UserId::new();
        let mut request = GrantRequest::user(user, PermissionLevel::Read);
        request.expires_at = Some(Utc::now() - Duration::days(1));
        reg.grant(file, request).await.expect("grant");

        assert!(reg.user_has_access(file, user).await.expect("check"));
        assert!(!reg.user_has_access(file, UserId::new()).await.expect("other"));
    }

    #[tokio::test]
    async fn test_user_access_honors_expiry_when_configured() {
        let reg = registry(SharingConfig {
            expire_user_grants: true,
            ..SharingConfig::default()
        });
        let file = ResourceRef::file(FileId::new());
        let user = UserId::new();
        let mut request = GrantRequest::user(user, PermissionLevel::Read);
        request.expires_at = Some(Utc::now() - Duration::days(1));
        reg.grant(file, request).await.expect("grant");

        assert!(!reg.user_has_access(file, user).await.expect("check"));
        assert!(reg.list_shared_with(user).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_public_link_does_not_grant_user_access() {
        let reg = registry(SharingConfig::default());
        let folder = ResourceRef::folder(FolderId::new());
        reg.grant(folder, GrantRequest::public_link(None)).await.expect("link");

        assert!(!reg.user_has_access(folder, UserId::new()).await.expect("check"));
    }

    #[tokio::test]
    async fn test_strongest_level_wins() {
        let reg = registry(SharingConfig::default());
        let folder = ResourceRef::folder(FolderId::new());
        let user = UserId::new();
        reg.grant(folder, GrantRequest::user(user, PermissionLevel::Read)).await.expect("read");
        reg.grant(folder, GrantRequest::user(user, PermissionLevel::Edit)).await.expect("edit");

        assert_eq!(
            reg.user_permission(folder, user).await.expect("level"),
            Some(PermissionLevel::Edit)
        );
    }

    #[tokio::test]
    async fn test_revoke_all_removes_access() {
        let reg = registry(SharingConfig::default());
        let folder = ResourceRef::folder(FolderId::new());
        let user = UserId::new();
        reg.grant(folder, GrantRequest::user(user, PermissionLevel::Edit)).await.expect("grant");
        reg.grant(folder, GrantRequest::public_link(None)).await.expect("link");
        assert!(reg.user_has_access(folder, user).await.expect("before"));

        assert_eq!(reg.revoke_all_for_resource(folder).await.expect("revoke"), 2);
        assert!(!reg.user_has_access(folder, user).await.expect("after"));
        assert!(reg.list_grants(folder).await.expect("list").is_empty());
    }
}
