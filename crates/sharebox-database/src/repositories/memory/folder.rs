//! In-memory folder repository.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::types::{FolderId, UserId};
use sharebox_entity::folder::{CreateFolder, Folder};

use crate::repositories::FolderRepository;

type ChildKey = (UserId, Option<FolderId>);

#[derive(Debug, Default)]
struct FolderArena {
    by_id: HashMap<FolderId, Folder>,
    children: HashMap<ChildKey, HashSet<FolderId>>,
}

impl FolderArena {
    fn link(&mut self, folder: &Folder) {
        self.children
            .entry((folder.owner_id, folder.parent_id))
            .or_default()
            .insert(folder.id);
    }

    fn unlink(&mut self, folder: &Folder) {
        let key = (folder.owner_id, folder.parent_id);
        if let Some(set) = self.children.get_mut(&key) {
            set.remove(&folder.id);
            if set.is_empty() {
                self.children.remove(&key);
            }
        }
    }
}

/// Folder rows held in process memory.
#[derive(Debug, Default)]
pub struct MemoryFolderRepository {
    arena: RwLock<FolderArena>,
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.arena.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_id_and_owner(
        &self,
        id: FolderId,
        owner: UserId,
    ) -> AppResult<Option<Folder>> {
        Ok(self
            .arena
            .read()
            .await
            .by_id
            .get(&id)
            .filter(|f| f.owner_id == owner)
            .cloned())
    }

    async fn find_children(
        &self,
        owner: UserId,
        parent: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        let arena = self.arena.read().await;
        let mut folders: Vec<Folder> = arena
            .children
            .get(&(owner, parent))
            .into_iter()
            .flatten()
            .filter_map(|id| arena.by_id.get(id).cloned())
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));
        Ok(folders)
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let folder = Folder::from_create(data.clone());
        let mut arena = self.arena.write().await;
        arena.link(&folder);
        arena.by_id.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        let Some(existing) = arena.by_id.get(&folder.id).cloned() else {
            return Err(AppError::not_found(format!("Folder {} not found", folder.id)));
        };

        let mut updated = existing.clone();
        updated.name = folder.name.clone();
        updated.parent_id = folder.parent_id;
        updated.updated_at = Utc::now();

        arena.unlink(&existing);
        arena.link(&updated);
        arena.by_id.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let mut arena = self.arena.write().await;
        match arena.by_id.remove(&id) {
            Some(folder) => {
                arena.unlink(&folder);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
