//! Share grant entities.

pub mod grant;
pub mod link;
pub mod permission;

pub use grant::{CreateGrant, ShareGrant};
pub use link::PublicLink;
pub use permission::PermissionLevel;
