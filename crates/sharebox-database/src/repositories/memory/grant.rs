//! In-memory share grant repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::types::{GrantId, UserId};
use sharebox_entity::resource::ResourceRef;
use sharebox_entity::share::{CreateGrant, ShareGrant};

use crate::repositories::GrantRepository;

#[derive(Debug, Default)]
struct GrantArena {
    by_id: HashMap<GrantId, ShareGrant>,
    by_resource: HashMap<ResourceRef, Vec<GrantId>>,
    by_token: HashMap<String, GrantId>,
}

impl GrantArena {
    fn remove(&mut self, id: GrantId) -> Option<ShareGrant> {
        let grant = self.by_id.remove(&id)?;
        let key = grant.resource();
        if let Some(ids) = self.by_resource.get_mut(&key) {
            ids.retain(|g| *g != id);
            if ids.is_empty() {
                self.by_resource.remove(&key);
            }
        }
        if let Some(token) = &grant.public_token {
            self.by_token.remove(token);
        }
        Some(grant)
    }

    fn collect(&self, ids: &[GrantId]) -> Vec<ShareGrant> {
        ids.iter().filter_map(|id| self.by_id.get(id).cloned()).collect()
    }
}

fn newest_first(mut grants: Vec<ShareGrant>) -> Vec<ShareGrant> {
    grants.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    grants
}

/// Grant rows held in process memory.
#[derive(Debug, Default)]
pub struct MemoryGrantRepository {
    arena: RwLock<GrantArena>,
}

#[async_trait]
impl GrantRepository for MemoryGrantRepository {
    async fn find_by_id(&self, id: GrantId) -> AppResult<Option<ShareGrant>> {
        Ok(self.arena.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<ShareGrant>> {
        let arena = self.arena.read().await;
        Ok(arena
            .by_token
            .get(token)
            .and_then(|id| arena.by_id.get(id))
            .filter(|g| g.is_public)
            .cloned())
    }

    async fn find_for_resource(&self, resource: ResourceRef) -> AppResult<Vec<ShareGrant>> {
        let arena = self.arena.read().await;
        let grants = arena
            .by_resource
            .get(&resource)
            .map(|ids| arena.collect(ids))
            .unwrap_or_default();
        Ok(newest_first(grants))
    }

    async fn find_for_target(
        &self,
        resource: ResourceRef,
        user: UserId,
    ) -> AppResult<Vec<ShareGrant>> {
        let arena = self.arena.read().await;
        Ok(arena
            .by_resource
            .get(&resource)
            .map(|ids| arena.collect(ids))
            .unwrap_or_default()
            .into_iter()
            .filter(|g| !g.is_public && g.target_user_id == Some(user))
            .collect())
    }

    async fn find_for_user(&self, user: UserId) -> AppResult<Vec<ShareGrant>> {
        let arena = self.arena.read().await;
        let grants = arena
            .by_id
            .values()
            .filter(|g| !g.is_public && g.target_user_id == Some(user))
            .cloned()
            .collect();
        Ok(newest_first(grants))
    }

    async fn create(&self, data: &CreateGrant) -> AppResult<ShareGrant> {
        let grant = ShareGrant::from_create(data.clone());
        let mut arena = self.arena.write().await;
        if let Some(token) = &grant.public_token {
            if arena.by_token.contains_key(token) {
                return Err(AppError::conflict("Public token already in use"));
            }
            arena.by_token.insert(token.clone(), grant.id);
        }
        arena
            .by_resource
            .entry(grant.resource())
            .or_default()
            .push(grant.id);
        arena.by_id.insert(grant.id, grant.clone());
        Ok(grant)
    }

    async fn delete(&self, id: GrantId) -> AppResult<bool> {
        Ok(self.arena.write().await.remove(id).is_some())
    }

    async fn delete_for_resource(&self, resource: ResourceRef) -> AppResult<u64> {
        let mut arena = self.arena.write().await;
        let ids = arena.by_resource.get(&resource).cloned().unwrap_or_default();
        let removed = ids
            .into_iter()
            .filter(|id| arena.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }
}
