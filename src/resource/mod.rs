//! Client-side model of the service's resources
//!
//! # Architecture
//!
//! - [`schema`] - Job types, their resource fields, statuses and routing resource types
//! - [`transform`] - Flat field set <-> nested job wire body
//! - [`query`] - Filter validation and deterministic query strings for list calls
//! - [`columns`] - Header and row projection for tabular display

pub mod columns;
pub mod query;
pub mod schema;
pub mod transform;

pub use columns::{project_columns, project_one, Cell, Projection, Remap};
pub use query::{build_query, list_path, FilterKey, FilterKind};
pub use schema::{resource_fields_for, JobStatus, JobType};
pub use transform::{from_wire, to_wire, FieldValues};
