//! Routing commands

use super::{body_from_fields, Output, View};
use crate::api::{ApiClient, Family};
use crate::error::Result;
use crate::resource::query::ROUTING_FILTERS;
use crate::resource::schema::{ROUTING_FILTER_RESOURCE_TYPES, ROUTING_RESOURCE_TYPES};
use clap::builder::PossibleValuesParser;
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

pub const COLUMNS: &[&str] = &["id", "pod_id", "resource_type", "top_id"];

pub const COLUMNS_REMAP: &[(&str, &str)] = &[
    ("id", "ID"),
    ("pod_id", "Pod ID"),
    ("resource_type", "Resource Type"),
    ("top_id", "Top ID"),
];

pub const VIEW: View = View {
    family: Family::Routing,
    columns: COLUMNS,
    remap: COLUMNS_REMAP,
    filters: ROUTING_FILTERS,
};

#[derive(Subcommand, Debug)]
pub enum RoutingCommand {
    /// List resource routings
    List(ListArgs),
    /// Create a resource routing
    Create(CreateArgs),
    /// Display resource routing details
    Show {
        /// ID of the routing to display
        routing: String,
    },
    /// Delete resource routing(s)
    Delete {
        /// ID(s) of the routing(s) to delete
        #[arg(required = true)]
        routings: Vec<String>,
    },
    /// Update a resource routing
    Update(UpdateArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Maximum number of routings to return
    #[arg(long, value_name = "NUM-ROUTINGS")]
    pub limit: Option<u64>,

    /// ID of the last routing in the previous page; routings after it are returned
    #[arg(long, value_name = "ROUTING")]
    pub marker: Option<String>,

    /// ID of a routing
    #[arg(long)]
    pub routing: Option<i64>,

    /// Resource ID in the top region
    #[arg(long, alias = "top_id")]
    pub top_id: Option<String>,

    /// Resource ID in the bottom region
    #[arg(long, alias = "bottom_id")]
    pub bottom_id: Option<String>,

    /// ID of a pod
    #[arg(long, alias = "pod_id")]
    pub pod_id: Option<String>,

    /// ID of a project object in the identity service
    #[arg(long, alias = "project_id")]
    pub project_id: Option<String>,

    /// Resource type
    #[arg(
        long,
        alias = "resource_type",
        value_parser = PossibleValuesParser::new(ROUTING_FILTER_RESOURCE_TYPES.iter().copied())
    )]
    pub resource_type: Option<String>,

    /// Creation time of the routing (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)
    #[arg(long, alias = "created_at")]
    pub created_at: Option<String>,

    /// Update time of the routing (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)
    #[arg(long, alias = "updated_at")]
    pub updated_at: Option<String>,
}

impl ListArgs {
    fn options(&self) -> [(&'static str, Option<String>); 10] {
        [
            ("limit", self.limit.map(|n| n.to_string())),
            ("marker", self.marker.clone()),
            ("id", self.routing.map(|n| n.to_string())),
            ("top_id", self.top_id.clone()),
            ("bottom_id", self.bottom_id.clone()),
            ("pod_id", self.pod_id.clone()),
            ("project_id", self.project_id.clone()),
            ("resource_type", self.resource_type.clone()),
            ("created_at", self.created_at.clone()),
            ("updated_at", self.updated_at.clone()),
        ]
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Resource ID in the top region
    #[arg(long, alias = "top_id")]
    pub top_id: String,

    /// Resource ID in the bottom region
    #[arg(long, alias = "bottom_id")]
    pub bottom_id: String,

    /// ID of a pod
    #[arg(long, alias = "pod_id")]
    pub pod_id: String,

    /// ID of a project object in the identity service
    #[arg(long, alias = "project_id")]
    pub project_id: String,

    /// Resource type
    #[arg(
        long,
        alias = "resource_type",
        value_parser = PossibleValuesParser::new(ROUTING_RESOURCE_TYPES.iter().copied())
    )]
    pub resource_type: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// ID of the routing to update
    pub routing: String,

    /// Resource ID in the top region
    #[arg(long, alias = "top_id")]
    pub top_id: Option<String>,

    /// Resource ID in the bottom region
    #[arg(long, alias = "bottom_id")]
    pub bottom_id: Option<String>,

    /// ID of a pod
    #[arg(long, alias = "pod_id")]
    pub pod_id: Option<String>,

    /// ID of a project object in the identity service
    #[arg(long, alias = "project_id")]
    pub project_id: Option<String>,

    /// Resource type
    #[arg(
        long,
        alias = "resource_type",
        value_parser = PossibleValuesParser::new(ROUTING_RESOURCE_TYPES.iter().copied())
    )]
    pub resource_type: Option<String>,
}

impl UpdateArgs {
    /// Only the fields the user supplied
    pub fn changes(&self) -> Map<String, Value> {
        body_from_fields([
            ("top_id", self.top_id.as_ref()),
            ("bottom_id", self.bottom_id.as_ref()),
            ("pod_id", self.pod_id.as_ref()),
            ("project_id", self.project_id.as_ref()),
            ("resource_type", self.resource_type.as_ref()),
        ])
    }
}

pub async fn execute(command: &RoutingCommand, client: &ApiClient) -> Result<Output> {
    tracing::debug!("routing: {:?}", command);

    match command {
        RoutingCommand::List(args) => VIEW.list(client, args.options()).await,
        RoutingCommand::Create(args) => {
            let routing = body_from_fields([
                ("top_id", Some(&args.top_id)),
                ("bottom_id", Some(&args.bottom_id)),
                ("pod_id", Some(&args.pod_id)),
                ("project_id", Some(&args.project_id)),
                ("resource_type", Some(&args.resource_type)),
            ]);
            let created = client.routings().create(routing).await?;
            Ok(VIEW.show(&created))
        }
        RoutingCommand::Show { routing } => {
            let routing = client.routings().get(routing).await?;
            Ok(VIEW.show(&routing))
        }
        RoutingCommand::Delete { routings } => VIEW.delete_each(client, routings).await,
        RoutingCommand::Update(args) => {
            client
                .routings()
                .update(&args.routing, args.changes())
                .await?;
            Ok(Output::Nothing)
        }
    }
}
