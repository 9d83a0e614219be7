//! Mersiv CLI - Maintenance tools for the `stores` collection.
//!
//! # Usage
//!
//! ```bash
//! # Print every store's video URL and link
//! mersiv-cli inspect
//!
//! # Set video URL and link on the stores named in the data set
//! mersiv-cli update-links
//!
//! # Clear the collection and insert the data-set stores
//! mersiv-cli reseed
//!
//! # Replace models on stores that have a model set
//! mersiv-cli update-models
//!
//! # Validate the data set without connecting
//! mersiv-cli dataset
//! ```
//!
//! # Commands
//!
//! - `inspect` (alias `check-videos`) - Read-only listing of media links
//! - `update-links` (alias `force-update`) - Patch links on named stores
//! - `reseed` (alias `seed`) - Replace the whole collection
//! - `update-models` - Replace `models` on stores with a defined set
//! - `dataset` - Validate and summarize the data set
//!
//! Reports go to standard output; logs go to standard error. The exit code
//! is 0 on success and 1 on any failure.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mersiv_admin::{MaintenanceError, Mode};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mersiv-cli")]
#[command(author, version, about = "Mersiv store maintenance tools")]
struct Cli {
    /// YAML data set to use instead of the built-in one
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each store's video URL and link
    #[command(alias = "check-videos")]
    Inspect,
    /// Set video URL and link on the stores named in the data set
    #[command(alias = "force-update")]
    UpdateLinks,
    /// Delete every store, then insert the data-set stores
    #[command(alias = "seed")]
    Reseed,
    /// Replace models on stores that have a model set
    UpdateModels,
    /// Validate the data set and print a summary
    Dataset,
}

/// Install the tracing subscriber, writing to standard error.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mersiv_admin=info,mersiv_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if let Err(e) = run(cli).await {
        tracing::error!("❌ Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), MaintenanceError> {
    let mode = match cli.command {
        Commands::Inspect => Mode::Inspect,
        Commands::UpdateLinks => Mode::UpdateLinks,
        Commands::Reseed => Mode::Reseed,
        Commands::UpdateModels => Mode::UpdateModels,
        Commands::Dataset => return commands::dataset::check(cli.dataset).await,
    };

    commands::maintenance::run(mode, cli.dataset).await
}
