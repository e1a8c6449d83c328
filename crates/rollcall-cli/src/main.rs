//! rollcall - print the community team roster with live GitHub activity.
//!
//! Loads the roster, looks up every member on GitHub concurrently, and
//! prints the "Current Team" and "Alumni" tabs as tables or JSON.

mod render;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rollcall_core::{
    fallback_roster, load_roster, load_team, AggregateClient, Config, Enricher, FileRosterSource,
    GitHubClient, HttpRosterSource, RosterSource, StaticRoster, SystemClock, TeamTab, TeamView,
    ThreadRandom,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TabArg {
    Current,
    Alumni,
    All,
}

impl TabArg {
    fn tabs(self) -> &'static [TeamTab] {
        match self {
            TabArg::Current => &[TeamTab::Current],
            TabArg::Alumni => &[TeamTab::Alumni],
            TabArg::All => &TeamTab::ALL,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rollcall", version, about = "Team roster with live GitHub activity")]
struct Cli {
    /// Which tab to print
    #[arg(long, value_enum, default_value_t = TabArg::All)]
    tab: TabArg,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Fetch the server-aggregated team data instead of querying GitHub per member
    #[arg(long)]
    aggregate: bool,

    /// Aggregation endpoint (overrides config)
    #[arg(long)]
    aggregate_url: Option<String>,

    /// Remote roster list (overrides config)
    #[arg(long)]
    roster_url: Option<String>,

    /// Roster JSON file (overrides config and --roster-url)
    #[arg(long)]
    roster_file: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref())?;
    info!("rollcall starting");

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.roster_url.clone() {
        config.roster_url = Some(url);
    }
    if let Some(path) = cli.roster_file.clone() {
        config.roster_file = Some(path);
    }
    if let Some(url) = cli.aggregate_url.clone() {
        config.aggregate_url = Some(url);
    }

    let mut api = GitHubClient::with_base_url(config.github_api_url(), config.request_timeout())
        .context("Failed to create GitHub client")?;
    if let Some(token) = config.github_token.clone() {
        api.set_token(token);
    }

    if cli.aggregate {
        return print_aggregate(&config, &api).await;
    }

    let source = roster_source(&config, &api);
    let roster = load_roster(source.as_ref()).await;

    let enricher = Enricher::new(api, Arc::new(SystemClock), Arc::new(ThreadRandom));
    let view = TeamView::new(load_team(roster, &enricher).await);
    info!(members = view.len(), "Team loaded");

    let tabs = cli.tab.tabs();
    if cli.json {
        let json = render::tabs_json(&view, tabs);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print!("{}", render::tabs_text(&view, tabs));
    }

    Ok(())
}

/// Pick the roster source: file, then remote list, then the built-in roster.
fn roster_source(config: &Config, api: &GitHubClient) -> Box<dyn RosterSource> {
    if let Some(ref path) = config.roster_file {
        Box::new(FileRosterSource::new(path.clone()))
    } else if let Some(ref url) = config.roster_url {
        Box::new(HttpRosterSource::new(api.http().clone(), url))
    } else {
        Box::new(StaticRoster(fallback_roster()))
    }
}

async fn print_aggregate(config: &Config, api: &GitHubClient) -> Result<()> {
    let endpoint = config.aggregate_url.as_deref().ok_or_else(|| {
        anyhow::anyhow!("No aggregation endpoint configured (use --aggregate-url or ROLLCALL_AGGREGATE_URL)")
    })?;

    let client = AggregateClient::new(api.http().clone(), endpoint, Arc::new(SystemClock));
    let data = client
        .fetch_aggregated()
        .await
        .context("Failed to fetch aggregated team data")?;

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
