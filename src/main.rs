//! helmdeck - a terminal dashboard for Helm releases
//!
//! Talks to a release-management backend over HTTP. Without a subcommand it
//! starts the interactive dashboard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use helmdeck::cli::{self, ConfigSubcommand, ReleaseCommand};
use helmdeck::config::ConfigLoader;
use helmdeck::services::{ReleaseService, Route};

/// helmdeck - a terminal dashboard for Helm releases
#[derive(Parser, Debug)]
#[command(name = "helmdeck")]
#[command(about = "A terminal dashboard for managing Helm releases", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Backend URL (overrides configuration)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    /// Cluster context sent to the backend (overrides configuration)
    #[arg(long, short = 'c', global = true)]
    context: Option<String>,

    /// Dashboard page to open, e.g. /revision/<context>/<namespace>/<name>/<revision>/<tab>
    #[arg(long)]
    route: Option<Route>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Display version information
    Version,
    #[command(flatten)]
    Release(ReleaseCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = cli::init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    match args.command {
        Some(Command::Config { subcommand }) => {
            return cli::handle_config_command(subcommand, args.context.as_deref());
        }
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        _ => {}
    }

    let config = ConfigLoader::load(args.context.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.server, args.context);
    tracing::debug!(
        "Configuration loaded: server={}, context={:?}, readOnly={}",
        config.server,
        config.kube_context,
        config.read_only
    );

    let service = ReleaseService::from_config(&config)?;

    match args.command {
        Some(Command::Release(cmd)) => {
            cli::handle_release_command(cmd, service.api(), config.read_only).await
        }
        _ => run_dashboard(config, service, args.route).await,
    }
}

#[cfg(feature = "tui")]
async fn run_dashboard(
    config: helmdeck::config::Config,
    service: ReleaseService,
    route: Option<Route>,
) -> Result<()> {
    helmdeck::tui::run_tui(config, service, route).await
}

#[cfg(not(feature = "tui"))]
async fn run_dashboard(
    _config: helmdeck::config::Config,
    _service: ReleaseService,
    _route: Option<Route>,
) -> Result<()> {
    anyhow::bail!("helmdeck was built without the dashboard; use a subcommand (see --help)")
}
