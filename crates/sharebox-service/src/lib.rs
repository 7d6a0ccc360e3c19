//! # sharebox-service
//!
//! Business logic for ShareBox. Services receive their repositories and
//! collaborators as `Arc` references at construction time and take a
//! [`RequestContext`] naming the acting user.
//!
//! - [`ResourceTree`]: folders, files, and their parent links
//! - [`PermissionRegistry`]: targeted and public-link grants
//! - [`AccessResolver`]: owner-or-grantee authorization
//! - [`CascadeCoordinator`]: subtree deletion across rows, grants, and blobs
//! - [`ShareService`]: owner-facing share management and public links

pub mod access;
pub mod cascade;
pub mod context;
pub mod permission;
pub mod services;
pub mod share;
pub mod tree;

pub use access::{Access, AccessMode, AccessResolver};
pub use cascade::{CascadeCoordinator, CascadeReport};
pub use context::RequestContext;
pub use permission::{GrantRequest, PermissionRegistry};
pub use services::Services;
pub use share::{PublicShare, ShareService, ShareView};
pub use tree::{ResourceTree, UploadFile};
