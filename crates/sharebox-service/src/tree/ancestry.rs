//! Parent-chain walks.

use std::collections::HashSet;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;
use sharebox_core::types::{FolderId, UserId};
use sharebox_entity::folder::Folder;

use super::ResourceTree;
use crate::context::RequestContext;

impl ResourceTree {
    /// Whether `ancestor_id` appears on `candidate_id`'s parent chain.
    ///
    /// The walk starts at the candidate's parent and stops at the top level.
    /// A folder on the chain that `owner` does not own fails with `Forbidden`;
    /// a folder seen twice means the stored tree already contains a cycle and
    /// fails with `CycleDetected`.
    pub async fn is_descendant(
        &self,
        candidate_id: FolderId,
        ancestor_id: FolderId,
        owner: UserId,
    ) -> AppResult<bool> {
        let mut visited = HashSet::from([candidate_id]);
        let mut current = self.chain_link(candidate_id, owner).await?.parent_id;

        while let Some(id) = current {
            if id == ancestor_id {
                return Ok(true);
            }
            if !visited.insert(id) {
                return Err(AppError::cycle_detected(format!(
                    "Folder {id} appears twice on its own ancestor chain"
                )));
            }
            current = self.chain_link(id, owner).await?.parent_id;
        }

        Ok(false)
    }

    /// The caller's folder and its ancestors, top level first.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<Vec<Folder>> {
        let folder = self.owned_folder(folder_id, ctx.user_id).await?;
        let mut visited = HashSet::from([folder.id]);
        let mut next = folder.parent_id;
        let mut chain = vec![folder];

        while let Some(id) = next {
            if !visited.insert(id) {
                return Err(AppError::cycle_detected(format!(
                    "Folder {id} appears twice on its own ancestor chain"
                )));
            }
            let parent = self.owned_folder(id, ctx.user_id).await?;
            next = parent.parent_id;
            chain.push(parent);
        }

        chain.reverse();
        Ok(chain)
    }

    async fn chain_link(&self, id: FolderId, owner: UserId) -> AppResult<Folder> {
        self.folders
            .find_by_id_and_owner(id, owner)
            .await?
            .ok_or_else(|| AppError::forbidden("Folder chain leaves the caller's tree"))
    }
}
