//! Pod commands

use super::{body_from_fields, Output, View};
use crate::api::{ApiClient, Family};
use crate::error::Result;
use crate::resource::query::POD_FILTERS;
use clap::{Args, Subcommand};

pub const COLUMNS: &[&str] = &["pod_id", "region_name"];

pub const COLUMNS_REMAP: &[(&str, &str)] = &[("pod_id", "ID"), ("region_name", "Region Name")];

pub const VIEW: View = View {
    family: Family::Pod,
    columns: COLUMNS,
    remap: COLUMNS_REMAP,
    filters: POD_FILTERS,
};

#[derive(Subcommand, Debug)]
pub enum PodCommand {
    /// List pods
    List,
    /// Create a pod
    Create(CreateArgs),
    /// Display pod details
    Show {
        /// ID of the pod to display
        pod: String,
    },
    /// Delete pod(s)
    Delete {
        /// ID(s) of the pod(s) to delete
        #[arg(required = true)]
        pods: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the region, as registered in the identity service
    #[arg(long, alias = "region_name")]
    pub region_name: String,

    /// Name of the availability zone
    #[arg(
        long = "availability-zone",
        alias = "availability_zone",
        value_name = "AZ_NAME"
    )]
    pub az_name: Option<String>,

    /// Name of the availability zone inside the pod
    #[arg(
        long = "pod-availability-zone",
        alias = "pod_availability_zone",
        value_name = "POD_AZ_NAME"
    )]
    pub pod_az_name: Option<String>,

    /// Name of the data center
    #[arg(long = "data-center", alias = "data_center", value_name = "DC_NAME")]
    pub dc_name: Option<String>,
}

pub async fn execute(command: &PodCommand, client: &ApiClient) -> Result<Output> {
    tracing::debug!("pod: {:?}", command);

    match command {
        PodCommand::List => {
            let none: [(&str, Option<String>); 0] = [];
            VIEW.list(client, none).await
        }
        PodCommand::Create(args) => {
            let pod = body_from_fields([
                ("region_name", Some(&args.region_name)),
                ("az_name", args.az_name.as_ref()),
                ("pod_az_name", args.pod_az_name.as_ref()),
                ("dc_name", args.dc_name.as_ref()),
            ]);
            let created = client.pods().create(pod).await?;
            Ok(VIEW.show(&created))
        }
        PodCommand::Show { pod } => {
            let pod = client.pods().get(pod).await?;
            Ok(VIEW.show(&pod))
        }
        PodCommand::Delete { pods } => VIEW.delete_each(client, pods).await,
    }
}
