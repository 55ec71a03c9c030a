//! Command-line parsing tests
//!
//! Argument errors must be caught by the parser, before any request is made.

use clap::error::ErrorKind;
use clap::Parser;
use mrnctl::commands::job::JobCommand;
use mrnctl::commands::pod::PodCommand;
use mrnctl::commands::routing::RoutingCommand;
use mrnctl::commands::{Cli, Commands, OutputFormat};
use mrnctl::resource::JobType;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("mrnctl").chain(args.iter().copied()))
}

#[test]
fn test_job_create_all_options() {
    let cli = parse(&[
        "job", "create", "--type", "router_setup", "--project-id", "P", "--pod-id", "Pd",
        "--router-id", "R", "--network-id", "N",
    ])
    .unwrap();

    let Commands::Job(JobCommand::Create(args)) = cli.command else {
        panic!("expected job create");
    };
    assert_eq!(args.job_type, JobType::RouterSetup);
    assert_eq!(args.project_id, "P");
    assert_eq!(args.pod_id.as_deref(), Some("Pd"));
    assert_eq!(args.router_id.as_deref(), Some("R"));
    assert_eq!(args.network_id.as_deref(), Some("N"));
    assert_eq!(args.port_id, None);
}

#[test]
fn test_job_create_accepts_snake_case_flags() {
    let cli = parse(&[
        "job", "create", "--type", "port_delete", "--project_id", "P", "--port_id", "X",
    ])
    .unwrap();

    let Commands::Job(JobCommand::Create(args)) = cli.command else {
        panic!("expected job create");
    };
    assert_eq!(args.port_id.as_deref(), Some("X"));
}

#[test]
fn test_job_create_requires_type_and_project() {
    let err = parse(&["job", "create", "--type", "router_setup"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

    let err = parse(&["job", "create", "--project-id", "P"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_job_create_rejects_unknown_type() {
    let err = parse(&["job", "create", "--type", "reboot", "--project-id", "P"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_job_list_pagination() {
    let cli = parse(&["job", "list", "--limit", "2", "--marker", "M123"]).unwrap();
    let Commands::Job(JobCommand::List(args)) = cli.command else {
        panic!("expected job list");
    };
    assert_eq!(args.limit, Some(2));
    assert_eq!(args.marker.as_deref(), Some("M123"));
}

#[test]
fn test_negative_limit_is_a_parse_error() {
    assert!(parse(&["job", "list", "--limit", "-1"]).is_err());
}

#[test]
fn test_show_and_delete_require_ids() {
    for args in [
        &["job", "show"][..],
        &["job", "delete"][..],
        &["job", "redo"][..],
        &["pod", "show"][..],
        &["pod", "delete"][..],
        &["routing", "show"][..],
        &["routing", "delete"][..],
        &["routing", "update"][..],
    ] {
        let err = parse(args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument, "{:?}", args);
    }
}

#[test]
fn test_delete_takes_many_ids_in_order() {
    let cli = parse(&["pod", "delete", "p1", "p2", "p3"]).unwrap();
    let Commands::Pod(PodCommand::Delete { pods }) = cli.command else {
        panic!("expected pod delete");
    };
    assert_eq!(pods, vec!["p1", "p2", "p3"]);
}

#[test]
fn test_pod_create_options() {
    let cli = parse(&[
        "pod", "create", "--region-name", "RegionOne", "--availability-zone", "az1",
        "--pod-availability-zone", "paz1", "--data-center", "dc1",
    ])
    .unwrap();
    let Commands::Pod(PodCommand::Create(args)) = cli.command else {
        panic!("expected pod create");
    };
    assert_eq!(args.region_name, "RegionOne");
    assert_eq!(args.az_name.as_deref(), Some("az1"));
    assert_eq!(args.pod_az_name.as_deref(), Some("paz1"));
    assert_eq!(args.dc_name.as_deref(), Some("dc1"));
}

#[test]
fn test_pod_create_requires_region_name() {
    let err = parse(&["pod", "create", "--availability-zone", "az1"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_routing_list_filters() {
    let cli = parse(&[
        "routing", "list", "--routing", "7", "--top-id", "T", "--resource-type", "port_chain",
        "--created-at", "2017-03-01 10:00:00",
    ])
    .unwrap();
    let Commands::Routing(RoutingCommand::List(args)) = cli.command else {
        panic!("expected routing list");
    };
    assert_eq!(args.routing, Some(7));
    assert_eq!(args.resource_type.as_deref(), Some("port_chain"));
    assert_eq!(args.created_at.as_deref(), Some("2017-03-01 10:00:00"));
}

#[test]
fn test_routing_list_rejects_unknown_resource_type() {
    let args = ["routing", "list", "--resource-type", "fake_resource_type"];
    let err = parse(&args).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_routing_create_limits_resource_types() {
    let base = [
        "routing", "create", "--top-id", "T", "--bottom-id", "B", "--pod-id", "Pd",
        "--project-id", "P", "--resource-type",
    ];

    let mut ok = base.to_vec();
    ok.push("security_group");
    assert!(parse(&ok).is_ok());

    // Filter-only types cannot be created
    let mut filter_only = base.to_vec();
    filter_only.push("trunk");
    let err = parse(&filter_only).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_pod_create_accepts_snake_case_flags() {
    let cli = parse(&[
        "pod", "create", "--region_name", "RegionOne", "--pod_availability_zone", "paz1",
        "--data_center", "dc1",
    ])
    .unwrap();
    let Commands::Pod(PodCommand::Create(args)) = cli.command else {
        panic!("expected pod create");
    };
    assert_eq!(args.region_name, "RegionOne");
    assert_eq!(args.pod_az_name.as_deref(), Some("paz1"));
    assert_eq!(args.dc_name.as_deref(), Some("dc1"));
}

#[test]
fn test_routing_accepts_snake_case_flags() {
    let cli = parse(&[
        "routing", "create", "--top_id", "T", "--bottom_id", "B", "--pod_id", "Pd",
        "--project_id", "P", "--resource_type", "port",
    ])
    .unwrap();
    let Commands::Routing(RoutingCommand::Create(args)) = cli.command else {
        panic!("expected routing create");
    };
    assert_eq!(args.top_id, "T");
    assert_eq!(args.resource_type, "port");

    let cli = parse(&["routing", "list", "--created_at", "2017-03-01"]).unwrap();
    let Commands::Routing(RoutingCommand::List(args)) = cli.command else {
        panic!("expected routing list");
    };
    assert_eq!(args.created_at.as_deref(), Some("2017-03-01"));
}

#[test]
fn test_routing_update_optional_fields() {
    let cli = parse(&["routing", "update", "7", "--bottom-id", "B2"]).unwrap();
    let Commands::Routing(RoutingCommand::Update(args)) = cli.command else {
        panic!("expected routing update");
    };
    assert_eq!(args.routing, "7");
    assert_eq!(args.bottom_id.as_deref(), Some("B2"));
    assert_eq!(args.top_id, None);
}

#[test]
fn test_global_options_anywhere() {
    let cli = parse(&[
        "pod", "list", "-f", "json", "--os-multiregion-networking-url", "http://host:19999",
    ])
    .unwrap();
    assert_eq!(cli.global.format, OutputFormat::Json);
    assert_eq!(cli.global.url.as_deref(), Some("http://host:19999"));
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
