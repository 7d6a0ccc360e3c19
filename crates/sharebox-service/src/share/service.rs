//! Share creation, listing, revocation, and public-link access.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use sharebox_core::error::{AppError, ErrorKind};
use sharebox_core::result::AppResult;
use sharebox_core::types::{GrantId, UserId};
use sharebox_entity::file::File;
use sharebox_entity::resource::{Resource, ResourceKind, ResourceRef, Shareable};

use super::view::{PublicShare, ShareView};
use crate::context::RequestContext;
use crate::permission::{GrantRequest, PermissionRegistry};
use crate::tree::ResourceTree;

/// Share management on top of [`PermissionRegistry`] and [`ResourceTree`].
#[derive(Debug)]
pub struct ShareService {
    tree: Arc<ResourceTree>,
    registry: Arc<PermissionRegistry>,
    /// Origin prepended to public-link paths.
    public_base_url: String,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        tree: Arc<ResourceTree>,
        registry: Arc<PermissionRegistry>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            tree,
            registry,
            public_base_url: public_base_url.into(),
        }
    }

    /// Share a resource the caller owns.
    pub async fn share_resource(
        &self,
        ctx: &RequestContext,
        resource: ResourceRef,
        request: GrantRequest,
    ) -> AppResult<ShareView> {
        let owned = self.owned_resource(resource, ctx.user_id).await?;
        if request.target_user_id == Some(ctx.user_id) {
            return Err(AppError::validation("Cannot share a resource with yourself"));
        }

        let grant = self.registry.grant(resource, request).await?;
        info!(
            user_id = %ctx.user_id,
            grant_id = %grant.id,
            resource = %resource,
            public = grant.is_public,
            "Resource shared"
        );
        Ok(ShareView::new(
            grant,
            owned.display_name().to_string(),
            &self.public_base_url,
        ))
    }

    /// Every grant on a resource the caller owns.
    pub async fn list_shares(
        &self,
        ctx: &RequestContext,
        resource: ResourceRef,
    ) -> AppResult<Vec<ShareView>> {
        let owned = self.owned_resource(resource, ctx.user_id).await?;
        let grants = self.registry.list_grants(resource).await?;
        Ok(grants
            .into_iter()
            .map(|g| ShareView::new(g, owned.display_name().to_string(), &self.public_base_url))
            .collect())
    }

    /// Grants naming the caller, with the shared resource's name.
    ///
    /// Grants whose resource has disappeared are skipped.
    pub async fn shared_with_me(&self, ctx: &RequestContext) -> AppResult<Vec<ShareView>> {
        let grants = self.registry.list_shared_with(ctx.user_id).await?;
        let mut views = Vec::with_capacity(grants.len());
        for grant in grants {
            match self.tree.resolve(grant.resource()).await {
                Ok(resource) => {
                    let name = resource.display_name().to_string();
                    views.push(ShareView::new(grant, name, &self.public_base_url));
                }
                Err(e) if e.is(ErrorKind::NotFound) => {
                    warn!(grant_id = %grant.id, "Grant points at a missing resource");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(views)
    }

    /// Revoke a grant on a resource the caller owns.
    pub async fn revoke_share(&self, ctx: &RequestContext, grant_id: GrantId) -> AppResult<()> {
        let grant = self.registry.get(grant_id).await?;
        self.owned_resource(grant.resource(), ctx.user_id)
            .await
            .map_err(|e| {
                if e.is(ErrorKind::NotFound) {
                    AppError::not_found(format!("Share {grant_id} not found"))
                } else {
                    e
                }
            })?;

        self.registry.revoke(grant_id).await?;
        info!(user_id = %ctx.user_id, grant_id = %grant_id, "Share revoked");
        Ok(())
    }

    /// Resolve a public link valid at `now` to a read-only view of its resource.
    pub async fn open_public_link(&self, token: &str, now: DateTime<Utc>) -> AppResult<PublicShare> {
        let grant = self.registry.resolve_public_link(token, now).await?;
        let resource = self.tree.resolve(grant.resource()).await.map_err(|e| {
            if e.is(ErrorKind::NotFound) {
                AppError::expired_or_invalid_link("Share link is invalid or expired")
            } else {
                e
            }
        })?;

        Ok(PublicShare {
            resource,
            expires_at: grant.expires_at,
        })
    }

    /// Content of the file behind a public link valid at `now`.
    pub async fn download_public_file(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(File, Bytes)> {
        match self.open_public_link(token, now).await?.resource {
            Resource::File(file) => {
                let data = self.tree.read_content(&file).await?;
                Ok((file, data))
            }
            Resource::Folder(_) => Err(AppError::validation(
                "This link shares a folder, not a file",
            )),
        }
    }

    async fn owned_resource(&self, reference: ResourceRef, owner: UserId) -> AppResult<Resource> {
        let resource = self.tree.resolve(reference).await?;
        if resource.owner_id() != owner {
            return Err(AppError::not_found(match reference.kind {
                ResourceKind::Folder => "Folder not found",
                ResourceKind::File => "File not found",
            }));
        }
        Ok(resource)
    }
}
