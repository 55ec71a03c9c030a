//! Client library and command-line front end for a multi-region networking
//! coordination service.
//!
//! # Module Structure
//!
//! - [`resource`] - Job schema, wire transforms, query strings and column projection
//! - [`api`] - HTTP transport, error taxonomy and per-family resource managers
//! - [`commands`] - The `job`, `pod` and `routing` command tree and output rendering
//! - [`config`] - Persistent configuration and connection settings

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod resource;

pub use error::{Error, Result};

/// Version injected at compile time via MRNCTL_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("MRNCTL_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
