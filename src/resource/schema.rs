//! Schema Registry
//!
//! Static description of the job model: the job type enumeration, the
//! resource-ID fields each job type carries, job statuses, and the resource
//! types a routing may reference. Every other module reads job shape from
//! here; adding a job type means adding one entry to [`JobType`] and one arm
//! to [`resource_fields_for`].

use crate::error::{Error, Result};
use clap::builder::PossibleValue;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asynchronous job types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    ConfigureRoute,
    RouterSetup,
    PortDelete,
    SegRuleSetup,
    UpdateNetwork,
    SubnetUpdate,
    ShadowPortSetup,
    TrunkSync,
    SfcSync,
    ResourceRecycle,
}

impl JobType {
    pub const ALL: [JobType; 10] = [
        JobType::ConfigureRoute,
        JobType::RouterSetup,
        JobType::PortDelete,
        JobType::SegRuleSetup,
        JobType::UpdateNetwork,
        JobType::SubnetUpdate,
        JobType::ShadowPortSetup,
        JobType::TrunkSync,
        JobType::SfcSync,
        JobType::ResourceRecycle,
    ];

    /// Wire name of the job type
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::ConfigureRoute => "configure_route",
            JobType::RouterSetup => "router_setup",
            JobType::PortDelete => "port_delete",
            JobType::SegRuleSetup => "seg_rule_setup",
            JobType::UpdateNetwork => "update_network",
            JobType::SubnetUpdate => "subnet_update",
            JobType::ShadowPortSetup => "shadow_port_setup",
            JobType::TrunkSync => "trunk_sync",
            JobType::SfcSync => "sfc_sync",
            JobType::ResourceRecycle => "resource_recycle",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownJobType(s.to_string()))
    }
}

impl ValueEnum for JobType {
    fn value_variants<'a>() -> &'a [Self] {
        &JobType::ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

/// Resource-ID fields carried in `job.resource`, in wire order.
pub fn resource_fields_for(job_type: JobType) -> &'static [&'static str] {
    match job_type {
        JobType::ConfigureRoute => &["router_id"],
        JobType::RouterSetup => &["pod_id", "router_id", "network_id"],
        JobType::PortDelete => &["pod_id", "port_id"],
        JobType::SegRuleSetup => &["project_id"],
        JobType::UpdateNetwork => &["pod_id", "network_id"],
        JobType::SubnetUpdate => &["pod_id", "subnet_id"],
        JobType::ShadowPortSetup => &["pod_id", "network_id"],
        JobType::TrunkSync => &["pod_id", "trunk_id"],
        JobType::SfcSync => &["pod_id", "portchain_id", "network_id"],
        JobType::ResourceRecycle => &["project_id"],
    }
}

/// Same as [`resource_fields_for`], keyed by the wire name of the job type.
pub fn resource_fields_for_name(job_type: &str) -> Result<&'static [&'static str]> {
    job_type.parse().map(resource_fields_for)
}

/// Job lifecycle status. Canonical form is uppercase; parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    New,
    Running,
    Success,
    Fail,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::New,
        JobStatus::Running,
        JobStatus::Success,
        JobStatus::Fail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::New => "NEW",
            JobStatus::Running => "RUNNING",
            JobStatus::Success => "SUCCESS",
            JobStatus::Fail => "FAIL",
        }
    }

    /// Lowercase form used in list filters
    pub fn filter_value(self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::invalid_filter("status", s, "expected one of new, running, success, fail")
            })
    }
}

/// Resource types a routing can be created or updated with
pub const ROUTING_RESOURCE_TYPES: &[&str] =
    &["network", "subnet", "port", "router", "security_group"];

/// Resource types accepted when filtering routings
pub const ROUTING_FILTER_RESOURCE_TYPES: &[&str] = &[
    "network",
    "subnet",
    "port",
    "router",
    "security_group",
    "trunk",
    "port_pair",
    "port_pair_group",
    "flow_classifier",
    "port_chain",
];
