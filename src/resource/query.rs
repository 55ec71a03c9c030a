//! Query Builder
//!
//! Turns recognized list options into a deterministic query string. Keys are
//! restricted to a per-family allow-list, values are validated and
//! normalized, absent values are dropped and the remaining pairs are emitted
//! sorted by key.

use super::schema::{JobStatus, JobType, ROUTING_FILTER_RESOURCE_TYPES};
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// How a filter value is validated before it goes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Non-negative page size
    Limit,
    /// Passed through untouched (IDs, markers)
    Opaque,
    /// Job status, case-insensitive, sent lowercase
    Status,
    JobType,
    /// Routing resource type
    ResourceType,
    /// Integer routing ID
    Integer,
    /// Date or timestamp, sent verbatim
    Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterKey {
    pub name: &'static str,
    pub kind: FilterKind,
}

const fn key(name: &'static str, kind: FilterKind) -> FilterKey {
    FilterKey { name, kind }
}

/// Filters accepted by `GET /jobs`
pub const JOB_FILTERS: &[FilterKey] = &[
    key("limit", FilterKind::Limit),
    key("marker", FilterKind::Opaque),
    key("project_id", FilterKind::Opaque),
    key("type", FilterKind::JobType),
    key("status", FilterKind::Status),
];

/// Filters accepted by `GET /routings`
pub const ROUTING_FILTERS: &[FilterKey] = &[
    key("limit", FilterKind::Limit),
    key("marker", FilterKind::Opaque),
    key("id", FilterKind::Integer),
    key("top_id", FilterKind::Opaque),
    key("bottom_id", FilterKind::Opaque),
    key("pod_id", FilterKind::Opaque),
    key("project_id", FilterKind::Opaque),
    key("resource_type", FilterKind::ResourceType),
    key("created_at", FilterKind::Timestamp),
    key("updated_at", FilterKind::Timestamp),
];

/// `GET /pods` takes no filters
pub const POD_FILTERS: &[FilterKey] = &[];

/// Build `?k1=v1&k2=v2` from `options`, or an empty string when nothing remains.
pub fn build_query<'a, I>(allowed: &[FilterKey], options: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    let mut params = BTreeMap::new();

    for (name, value) in options {
        let Some(filter) = allowed.iter().find(|f| f.name == name) else {
            return Err(Error::UnsupportedFilter(name.to_string()));
        };
        let Some(value) = value else {
            continue;
        };
        params.insert(filter.name, normalize(filter, &value)?);
    }

    if params.is_empty() {
        return Ok(String::new());
    }

    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    Ok(format!("?{}", encoded))
}

/// Append a query string to a collection path. Returns a new string every call.
pub fn list_path(collection: &str, query: &str) -> String {
    format!("{}{}", collection, query)
}

fn normalize(filter: &FilterKey, value: &str) -> Result<String> {
    match filter.kind {
        FilterKind::Opaque => Ok(value.to_string()),
        FilterKind::Limit => value
            .trim()
            .parse::<u64>()
            .map(|n| n.to_string())
            .map_err(|_| {
                Error::invalid_filter(filter.name, value, "expected a non-negative integer")
            }),
        FilterKind::Integer => value
            .trim()
            .parse::<i64>()
            .map(|n| n.to_string())
            .map_err(|_| {
                Error::invalid_filter(filter.name, value, "expected an integer")
            }),
        FilterKind::Status => value.parse::<JobStatus>().map(JobStatus::filter_value),
        FilterKind::JobType => value
            .parse::<JobType>()
            .map(|t| t.as_str().to_string())
            .map_err(|_| Error::invalid_filter(filter.name, value, "unknown job type")),
        FilterKind::ResourceType => {
            if ROUTING_FILTER_RESOURCE_TYPES.contains(&value) {
                Ok(value.to_string())
            } else {
                Err(Error::invalid_filter(
                    filter.name,
                    value,
                    format!(
                        "expected one of {}",
                        ROUTING_FILTER_RESOURCE_TYPES.join(", ")
                    ),
                ))
            }
        }
        FilterKind::Timestamp => {
            if is_timestamp(value) {
                Ok(value.to_string())
            } else {
                Err(Error::invalid_filter(
                    filter.name,
                    value,
                    "expected a date (YYYY-MM-DD) or timestamp (YYYY-MM-DD HH:MM:SS)",
                ))
            }
        }
    }
}

fn is_timestamp(value: &str) -> bool {
    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}
