//! In-memory file repository.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::types::{FileId, FolderId, UserId};
use sharebox_entity::file::{CreateFile, File};

use crate::repositories::FileRepository;

#[derive(Debug, Default)]
struct FileArena {
    by_id: HashMap<FileId, File>,
    by_folder: HashMap<(UserId, Option<FolderId>), HashSet<FileId>>,
}

impl FileArena {
    fn link(&mut self, file: &File) {
        self.by_folder
            .entry((file.owner_id, file.folder_id))
            .or_default()
            .insert(file.id);
    }

    fn unlink(&mut self, file: &File) {
        let key = (file.owner_id, file.folder_id);
        if let Some(set) = self.by_folder.get_mut(&key) {
            set.remove(&file.id);
            if set.is_empty() {
                self.by_folder.remove(&key);
            }
        }
    }
}

/// File rows held in process memory.
#[derive(Debug, Default)]
pub struct MemoryFileRepository {
    arena: RwLock<FileArena>,
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        Ok(self.arena.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_id_and_owner(&self, id: FileId, owner: UserId) -> AppResult<Option<File>> {
        Ok(self
            .arena
            .read()
            .await
            .by_id
            .get(&id)
            .filter(|f| f.owner_id == owner)
            .cloned())
    }

    async fn find_in_folder(
        &self,
        owner: UserId,
        folder: Option<FolderId>,
    ) -> AppResult<Vec<File>> {
        let arena = self.arena.read().await;
        let mut files: Vec<File> = arena
            .by_folder
            .get(&(owner, folder))
            .into_iter()
            .flatten()
            .filter_map(|id| arena.by_id.get(id).cloned())
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));
        Ok(files)
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let file = File::from_create(data.clone());
        let mut arena = self.arena.write().await;
        arena.link(&file);
        arena.by_id.insert(file.id, file.clone());
        Ok(file)
    }

    async fn update(&self, file: &File) -> AppResult<File> {
        let mut arena = self.arena.write().await;
        let Some(existing) = arena.by_id.get(&file.id).cloned() else {
            return Err(AppError::not_found(format!("File {} not found", file.id)));
        };

        let mut updated = existing.clone();
        updated.name = file.name.clone();
        updated.folder_id = file.folder_id;
        updated.updated_at = Utc::now();

        arena.unlink(&existing);
        arena.link(&updated);
        arena.by_id.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: FileId) -> AppResult<bool> {
        let mut arena = self.arena.write().await;
        match arena.by_id.remove(&id) {
            Some(file) => {
                arena.unlink(&file);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, owner: UserId, folder: Option<FolderId>) -> CreateFile {
        CreateFile {
            storage_key: format!("key-{name}"),
            name: name.to_string(),
            content_type: "application/octet-stream".to_string(),
            size_bytes: 1,
            owner_id: owner,
            folder_id: folder,
        }
    }

    #[tokio::test]
    async fn test_listing_is_sorted_and_scoped() {
        let repo = MemoryFileRepository::default();
        let owner = UserId::new();
        let folder = FolderId::new();
        repo.create(&create("b.txt", owner, Some(folder))).await.expect("b");
        repo.create(&create("a.txt", owner, Some(folder))).await.expect("a");
        repo.create(&create("top.txt", owner, None)).await.expect("top");

        let names: Vec<String> = repo
            .find_in_folder(owner, Some(folder))
            .await
            .expect("list")
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(repo.find_in_folder(owner, None).await.expect("top").len(), 1);
    }

    #[tokio::test]
    async fn test_move_reindexes() {
        let repo = MemoryFileRepository::default();
        let owner = UserId::new();
        let target = FolderId::new();
        let file = repo.create(&create("x", owner, None)).await.expect("x");

        let mut moved = file.clone();
        moved.folder_id = Some(target);
        let saved = repo.update(&moved).await.expect("update");

        assert_eq!(saved.storage_key, file.storage_key);
        assert!(repo.find_in_folder(owner, None).await.expect("top").is_empty());
        assert_eq!(repo.find_in_folder(owner, Some(target)).await.expect("t").len(), 1);
    }
}
