//! Grant storage and lookup.

pub mod registry;
pub mod token;

pub use registry::{GrantRequest, PermissionRegistry};
pub use token::generate_token;
