//! Job commands

use super::{Output, View};
use crate::api::{ApiClient, Family};
use crate::error::Result;
use crate::resource::query::JOB_FILTERS;
use crate::resource::{from_wire, to_wire, FieldValues, JobType};
use clap::{Args, Subcommand};

/// Columns shown by `job list`. Resource fields vary by type and are left out.
pub const COLUMNS: &[&str] = &["id", "project_id", "status", "timestamp", "type"];

pub const COLUMNS_REMAP: &[(&str, &str)] = &[
    ("id", "ID"),
    ("project_id", "Project"),
    ("status", "Status"),
    ("timestamp", "Timestamp"),
    ("type", "Type"),
];

pub const VIEW: View = View {
    family: Family::Job,
    columns: COLUMNS,
    remap: COLUMNS_REMAP,
    filters: JOB_FILTERS,
};

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// List jobs
    List(ListArgs),
    /// Create a job
    Create(CreateArgs),
    /// Display job details
    Show {
        /// ID of the job to display
        id: String,
    },
    /// Delete job(s)
    Delete {
        /// ID(s) of the job(s) to delete
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Redo job(s)
    Redo {
        /// ID(s) of the job(s) to redo
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Maximum number of jobs to return
    #[arg(long, value_name = "NUM-JOBS")]
    pub limit: Option<u64>,

    /// ID of the last job in the previous page; jobs after it are returned
    #[arg(long, value_name = "JOB")]
    pub marker: Option<String>,

    /// ID of a project object in the identity service
    #[arg(long, alias = "project_id")]
    pub project_id: Option<String>,

    /// Job type
    #[arg(long = "type", value_name = "TYPE")]
    pub job_type: Option<String>,

    /// Job status: new, running, success or fail (any case)
    #[arg(long)]
    pub status: Option<String>,
}

impl ListArgs {
    fn options(&self) -> [(&'static str, Option<String>); 5] {
        [
            ("limit", self.limit.map(|n| n.to_string())),
            ("marker", self.marker.clone()),
            ("project_id", self.project_id.clone()),
            ("type", self.job_type.clone()),
            ("status", self.status.clone()),
        ]
    }
}

// Resource fields are flattened into optional flags. A new resource kind
// needs a flag here and an entry in `field_values`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Job type
    #[arg(long = "type", value_enum)]
    pub job_type: JobType,

    /// ID of a project object in the identity service
    #[arg(long, alias = "project_id")]
    pub project_id: String,

    /// ID of a router
    #[arg(long, alias = "router_id")]
    pub router_id: Option<String>,

    /// ID of a network
    #[arg(long, alias = "network_id")]
    pub network_id: Option<String>,

    /// ID of a pod
    #[arg(long, alias = "pod_id")]
    pub pod_id: Option<String>,

    /// ID of a port
    #[arg(long, alias = "port_id")]
    pub port_id: Option<String>,

    /// ID of a trunk
    #[arg(long, alias = "trunk_id")]
    pub trunk_id: Option<String>,

    /// ID of a subnet
    #[arg(long, alias = "subnet_id")]
    pub subnet_id: Option<String>,

    /// ID of a port chain
    #[arg(long, alias = "portchain_id")]
    pub portchain_id: Option<String>,
}

impl CreateArgs {
    /// Supplied resource fields by name
    pub fn field_values(&self) -> FieldValues {
        [
            ("project_id", Some(&self.project_id)),
            ("router_id", self.router_id.as_ref()),
            ("network_id", self.network_id.as_ref()),
            ("pod_id", self.pod_id.as_ref()),
            ("port_id", self.port_id.as_ref()),
            ("trunk_id", self.trunk_id.as_ref()),
            ("subnet_id", self.subnet_id.as_ref()),
            ("portchain_id", self.portchain_id.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v.clone())))
        .collect()
    }
}

pub async fn execute(command: &JobCommand, client: &ApiClient) -> Result<Output> {
    tracing::debug!("job: {:?}", command);

    match command {
        JobCommand::List(args) => VIEW.list(client, args.options()).await,
        JobCommand::Create(args) => {
            let job = to_wire(args.job_type, &args.project_id, &args.field_values());
            let created = client.jobs().create(job).await?;
            Ok(VIEW.show(&from_wire(created)?))
        }
        JobCommand::Show { id } => {
            let job = client.jobs().get(id).await?;
            Ok(VIEW.show(&from_wire(job)?))
        }
        JobCommand::Delete { ids } => VIEW.delete_each(client, ids).await,
        JobCommand::Redo { ids } => {
            let jobs = client.jobs();
            for id in ids {
                tracing::info!("Redoing job {}", id);
                jobs.redo(id).await?;
            }
            Ok(Output::Nothing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_args(job_type: JobType) -> CreateArgs {
        CreateArgs {
            job_type,
            project_id: "P".into(),
            router_id: Some("R".into()),
            network_id: Some("N".into()),
            pod_id: Some("Pd".into()),
            port_id: None,
            trunk_id: None,
            subnet_id: None,
            portchain_id: None,
        }
    }

    #[test]
    fn test_field_values_only_has_supplied_fields() {
        let values = create_args(JobType::RouterSetup).field_values();
        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["network_id", "pod_id", "project_id", "router_id"]
        );
    }

    #[test]
    fn test_list_options_cover_allow_list() {
        let args = ListArgs::default();
        for (name, value) in args.options() {
            assert!(JOB_FILTERS.iter().any(|f| f.name == name));
            assert!(value.is_none());
        }
    }

    #[test]
    fn test_columns_all_remapped() {
        for column in COLUMNS {
            assert!(COLUMNS_REMAP.iter().any(|(field, _)| field == column));
        }
    }
}
