use anyhow::Result;
use clap::Parser;
use mrnctl::api::ApiClient;
use mrnctl::commands::{self, Cli, LogLevel};
use mrnctl::config::{Config, Settings};
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter for the log file: `--log-level` is the default, RUST_LOG directives
/// (e.g. RUST_LOG=mrnctl::api=trace) replace it.
fn log_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(tracing_level, directives.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(
        "mrnctl {} started with log level: {:?}",
        mrnctl::VERSION,
        level
    );
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("mrnctl").join("mrnctl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".mrnctl").join("mrnctl.log");
    }
    PathBuf::from("mrnctl.log")
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.global.overrides(), Config::load())?;
    tracing::info!(
        "Using endpoint: {}, region: {}",
        settings.base_url(),
        settings.region_name.as_deref().unwrap_or("-")
    );

    let client = ApiClient::from_settings(&settings)?;
    let output = commands::execute(&cli.command, &client).await?;

    let mut stdout = io::stdout().lock();
    commands::render(&output, cli.global.format, &mut stdout)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_guard = setup_logging(cli.global.log_level);

    if let Err(err) = run(cli).await {
        tracing::error!("Command failed: {:#}", err);
        eprintln!("Error: {err:#}");
        // Flush the log writer before exiting
        drop(log_guard);
        std::process::exit(1);
    }
}
