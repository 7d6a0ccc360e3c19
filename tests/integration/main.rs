//! HTTP-level integration tests driving the router in-process.

mod helpers;

mod auth_test;
mod file_test;
mod folder_test;
mod public_test;
mod share_test;
