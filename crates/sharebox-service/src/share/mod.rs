//! Owner-facing share management and public-link resolution.

pub mod service;
pub mod view;

pub use service::ShareService;
pub use view::{PublicShare, ShareView};
