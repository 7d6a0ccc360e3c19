//! Wiring of the service graph.

use std::sync::Arc;

use sharebox_core::config::AppConfig;
use sharebox_core::traits::BlobStore;
use sharebox_database::Repositories;

use crate::access::AccessResolver;
use crate::cascade::CascadeCoordinator;
use crate::permission::PermissionRegistry;
use crate::share::ShareService;
use crate::tree::ResourceTree;

/// Every service, built once at startup and shared by request handlers.
#[derive(Debug, Clone)]
pub struct Services {
    /// Folder and file hierarchy.
    pub tree: Arc<ResourceTree>,
    /// Grant storage.
    pub registry: Arc<PermissionRegistry>,
    /// Authorization.
    pub access: Arc<AccessResolver>,
    /// Subtree deletion.
    pub cascade: Arc<CascadeCoordinator>,
    /// Share management and public links.
    pub shares: Arc<ShareService>,
}

impl Services {
    /// Build the service graph over `repos` and `blobs`.
    pub fn new(repos: Repositories, blobs: Arc<dyn BlobStore>, config: &AppConfig) -> Self {
        let registry = Arc::new(PermissionRegistry::new(
            repos.grants.clone(),
            config.sharing.clone(),
        ));
        let access = Arc::new(AccessResolver::new(registry.clone()));
        let tree = Arc::new(ResourceTree::new(
            repos.folders.clone(),
            repos.files.clone(),
            blobs.clone(),
            access.clone(),
        ));
        let cascade = Arc::new(CascadeCoordinator::new(
            repos.folders,
            repos.files,
            registry.clone(),
            blobs,
        ));
        let shares = Arc::new(ShareService::new(
            tree.clone(),
            registry.clone(),
            config.server.public_base_url.clone(),
        ));

        Self {
            tree,
            registry,
            access,
            cascade,
            shares,
        }
    }
}
