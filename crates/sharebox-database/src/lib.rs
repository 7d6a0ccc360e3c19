//! # sharebox-database
//!
//! Metadata persistence for ShareBox: the repository traits the service
//! layer depends on, their PostgreSQL implementations, and an in-memory
//! arena used for tests and single-process deployments.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{FileRepository, FolderRepository, GrantRepository, Repositories};
