//! # sharebox-core
//!
//! Core crate for ShareBox. Contains the collaborator traits
//! ([`BlobStore`](traits::BlobStore), [`AuthProvider`](traits::AuthProvider)),
//! configuration schemas, typed identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ShareBox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
