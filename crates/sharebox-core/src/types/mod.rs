//! Core type definitions used across the ShareBox workspace.

pub mod id;

pub use id::*;
