//! Command Layer
//!
//! The `job`, `pod` and `routing` command tree. Every command follows the
//! same shape: parse arguments, build a body or query, call the family's
//! resource manager, and project the result for display.
//!
//! The verbs shared by all families are implemented once in [`View`] and
//! configured per family with its column list, header remap and filter
//! allow-list.

pub mod job;
pub mod output;
pub mod pod;
pub mod routing;

use crate::api::{ApiClient, Family};
use crate::config::Overrides;
use crate::error::Result;
use crate::resource::{
    build_query, list_path, project_columns, project_one, FilterKey, Projection, Remap,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use tracing::Level;

pub use job::JobCommand;
pub use output::{render, OutputFormat};
pub use pod::PodCommand;
pub use routing::RoutingCommand;

/// Command-line client for the multi-region networking service
#[derive(Parser, Debug)]
#[command(name = "mrnctl", version = crate::VERSION, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug)]
pub struct GlobalArgs {
    /// Multi-region networking API URL
    #[arg(
        long = "os-multiregion-networking-url",
        env = "OS_MULTIREGION_NETWORKING_URL",
        global = true
    )]
    pub url: Option<String>,

    /// Multi-region networking API version
    #[arg(
        long = "os-multiregion-networking-api-version",
        env = "OS_MULTIREGION_NETWORKING_API_VERSION",
        global = true
    )]
    pub api_version: Option<String>,

    /// Identity-service token sent with every request
    #[arg(
        long = "os-token",
        env = "OS_AUTH_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Region the service endpoint belongs to
    #[arg(long = "os-region-name", env = "OS_REGION_NAME", global = true)]
    pub region_name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    pub log_level: LogLevel,
}

impl GlobalArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.url.clone(),
            token: self.token.clone(),
            region_name: self.region_name.clone(),
            api_version: self.api_version.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage asynchronous jobs
    #[command(subcommand)]
    Job(JobCommand),
    /// Manage pods (registered regions)
    #[command(subcommand)]
    Pod(PodCommand),
    /// Manage resource routings
    #[command(subcommand)]
    Routing(RoutingCommand),
}

/// What a command hands back for display
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Nothing to print (delete, redo, update)
    Nothing,
    /// One row per resource under fixed column headers
    List(Projection),
    /// One resource as field/value pairs
    Show(Projection),
}

/// Run one command against the service
pub async fn execute(command: &Commands, client: &ApiClient) -> Result<Output> {
    match command {
        Commands::Job(cmd) => job::execute(cmd, client).await,
        Commands::Pod(cmd) => pod::execute(cmd, client).await,
        Commands::Routing(cmd) => routing::execute(cmd, client).await,
    }
}

/// Per-family configuration of the shared verbs
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub family: Family,
    /// Columns shown by `list`, in order
    pub columns: &'static [&'static str],
    /// Display names for `columns`
    pub remap: &'static Remap,
    /// Filters `list` accepts
    pub filters: &'static [FilterKey],
}

impl View {
    /// `GET` the collection with the given filters and project it over the list columns
    pub async fn list<'a, I>(&self, client: &ApiClient, options: I) -> Result<Output>
    where
        I: IntoIterator<Item = (&'a str, Option<String>)>,
    {
        let query = build_query(self.filters, options)?;
        let path = list_path(&self.family.path(), &query);
        let items = client.manager(self.family).list(&path).await?;
        tracing::debug!("Listed {} {}", items.len(), self.family.collection());

        let projection = project_columns(self.columns, self.remap, &items);
        Ok(Output::List(projection))
    }

    /// Project a single resource over the keys it has, under their literal names
    pub fn show(&self, resource: &Map<String, Value>) -> Output {
        Output::Show(project_one(resource, &[]))
    }

    /// Delete each ID in order. Stops at the first failure; earlier deletions stand.
    pub async fn delete_each(&self, client: &ApiClient, ids: &[String]) -> Result<Output> {
        let manager = client.manager(self.family);
        for id in ids {
            tracing::info!("Deleting {} {}", self.family, id);
            manager.delete(id).await?;
        }
        Ok(Output::Nothing)
    }
}

/// Collect `(field, value)` pairs into a body, skipping absent and blank values
pub(crate) fn body_from_fields<'a, I>(fields: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'a str, Option<&'a String>)>,
{
    fields
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (name.to_string(), Value::String(v.clone())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_from_fields_skips_blank_values() {
        let region = "RegionOne".to_string();
        let blank = " ".to_string();
        let body = body_from_fields([
            ("region_name", Some(&region)),
            ("az_name", Some(&blank)),
            ("dc_name", None),
        ]);

        assert_eq!(Value::Object(body), json!({"region_name": "RegionOne"}));
    }

    #[test]
    fn test_show_uses_literal_field_names() {
        let view = View {
            family: Family::Pod,
            columns: &["pod_id"],
            remap: &[("pod_id", "ID")],
            filters: &[],
        };
        let resource = json!({"pod_id": "P1", "region_name": "RegionOne"});
        let Output::Show(projection) = view.show(resource.as_object().unwrap()) else {
            panic!("show should produce a single-resource projection");
        };
        assert_eq!(projection.headers, vec!["pod_id", "region_name"]);
    }
}
