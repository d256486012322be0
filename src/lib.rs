//! Linkding Sync — fetches bookmarks from a self-hosted Linkding instance and appends
//! them to a Markdown note, on demand or on a timer.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
