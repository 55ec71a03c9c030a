//! Resource Transform
//!
//! Converts between the flat field set a user supplies on the command line
//! and the nested job body the service expects:
//!
//! ```text
//! {type, project_id, pod_id, router_id, ...}
//!     <->  {type, project_id, resource: {pod_id, router_id, ...}}
//! ```
//!
//! Which fields move in and out of `resource` is decided by the schema
//! registry alone.

use super::schema::{resource_fields_for, resource_fields_for_name, JobType};
use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flat field values keyed by field name (`pod_id`, `router_id`, ...)
pub type FieldValues = BTreeMap<String, String>;

/// Build the wire form of a job.
///
/// Only the resource fields registered for `job_type` are read from
/// `fields`; anything else is ignored. A registered field with no value is
/// sent as `null`. `project_id` doubles as a resource field for some job
/// types and is always the job's own project.
pub fn to_wire(job_type: JobType, project_id: &str, fields: &FieldValues) -> Map<String, Value> {
    let resource: Map<String, Value> = resource_fields_for(job_type)
        .iter()
        .map(|&name| {
            let value = if name == "project_id" {
                Value::String(project_id.to_string())
            } else {
                fields
                    .get(name)
                    .map_or(Value::Null, |v| Value::String(v.clone()))
            };
            (name.to_string(), value)
        })
        .collect();

    let mut job = Map::new();
    job.insert("type".into(), Value::String(job_type.as_str().to_string()));
    job.insert("project_id".into(), Value::String(project_id.to_string()));
    job.insert("resource".into(), Value::Object(resource));
    job
}

/// Flatten a job returned by the service for display.
///
/// Every resource field registered for the job's type is lifted to the top
/// level and the `resource` key is removed. A registered field missing from
/// `resource` is an error; an explicit `null` is kept as `null`.
pub fn from_wire(mut job: Map<String, Value>) -> Result<Map<String, Value>> {
    let job_type = job
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedJob("job has no type".into()))?
        .to_string();

    let fields = resource_fields_for_name(&job_type)
        .map_err(|_| Error::MalformedJob(format!("unknown job type '{job_type}'")))?;

    let resource = match job.remove("resource") {
        Some(Value::Object(resource)) => resource,
        Some(_) => {
            return Err(Error::MalformedJob(
                "job resource is not an object".into(),
            ))
        }
        None => return Err(Error::MalformedJob("job has no resource".into())),
    };

    for &name in fields {
        let value = resource.get(name).cloned().ok_or_else(|| {
            Error::MalformedJob(format!(
                "{} job resource is missing '{}'",
                job_type, name
            ))
        })?;
        job.insert(name.to_string(), value);
    }

    Ok(job)
}
