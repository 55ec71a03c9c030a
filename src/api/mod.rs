//! Service API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Service client bound to a base URL
//! - [`error`] - HTTP status / response-text error taxonomy
//! - [`http`] - HTTP utilities for REST API calls
//! - [`manager`] - Generic per-family CRUD manager
//!
//! # Example
//!
//! ```ignore
//! use mrnctl::api::ApiClient;
//!
//! async fn example() -> mrnctl::Result<()> {
//!     let client = ApiClient::new("http://127.0.0.1:19999/v1", None)?;
//!     let job = client.jobs().get("3f1c...").await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod manager;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
pub use manager::{Family, ResourceManager};
