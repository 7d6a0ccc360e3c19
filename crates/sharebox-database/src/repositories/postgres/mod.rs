//! PostgreSQL repository implementations.

mod file;
mod folder;
mod grant;

pub use file::PgFileRepository;
pub use folder::PgFolderRepository;
pub use grant::PgGrantRepository;
