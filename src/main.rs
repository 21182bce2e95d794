mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schedsync_core::config::SyncConfig;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "schedsync")]
#[command(about = "Mirror an exported schedule table into a calendar")]
struct Cli {
    /// Show debug logs and list every pending change
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.config/schedsync/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert missing events into the destination and delete stale ones
    Sync {
        /// Apply deletions even when the export has no events
        #[arg(long)]
        force: bool,

        /// Read the export from this file instead of the configured source
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show what `sync` would change without touching the destination
    Status {
        /// Read the export from this file instead of the configured source
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Normalize an export and report rows that could not be read
    Check {
        /// Read the export from this file instead of the configured source
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    Auth {
        provider: String, // e.g. "google"
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Auth { provider } => commands::auth::run(&provider).await,
        Commands::Sync { force, file } => {
            let config = SyncConfig::load(cli.config.as_deref())?;
            commands::sync::run(&config, file.as_deref(), force, cli.verbose).await
        }
        Commands::Status { file } => {
            let config = SyncConfig::load(cli.config.as_deref())?;
            commands::status::run(&config, file.as_deref(), cli.verbose).await
        }
        Commands::Check { file } => {
            let config = load_for_check(cli.config.as_deref(), file.is_some())?;
            commands::check::run(&config, file.as_deref(), cli.verbose).await
        }
    }
}

/// Logs go to stderr so they never mix with the report on stdout.
fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "schedsync=debug"
    } else {
        "schedsync=info"
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")?;

    Ok(())
}

/// `check --file` works before any config exists.
fn load_for_check(path: Option<&std::path::Path>, has_file: bool) -> Result<SyncConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => SyncConfig::config_path()?,
    };

    if has_file && !config_path.exists() {
        return Ok(SyncConfig::default());
    }

    Ok(SyncConfig::load(Some(&config_path))?)
}
