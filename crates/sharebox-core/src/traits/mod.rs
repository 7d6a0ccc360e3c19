//! Collaborator traits defined in `sharebox-core` and implemented by other crates.

pub mod auth;
pub mod blob;

pub use auth::{AuthProvider, Credentials};
pub use blob::BlobStore;
