//! # sharebox-auth
//!
//! Bearer-token authentication for ShareBox.
//!
//! - `jwt` — token claims, signing, and validation
//! - [`JwtAuthProvider`] — the [`AuthProvider`](sharebox_core::traits::AuthProvider)
//!   the HTTP layer resolves actors through

pub mod jwt;
pub mod provider;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use provider::JwtAuthProvider;
