//! In-memory repository implementations.
//!
//! Each repository keeps an id-keyed arena plus secondary indexes behind a
//! single `tokio::sync::RwLock`, so every trait method observes and leaves
//! the indexes consistent.

mod file;
mod folder;
mod grant;

pub use file::MemoryFileRepository;
pub use folder::MemoryFolderRepository;
pub use grant::MemoryGrantRepository;
