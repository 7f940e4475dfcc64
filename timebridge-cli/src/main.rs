//! timebridge: copy tracked time from Toggl Track into Runn actuals.
//!
//! # Usage
//!
//! ```text
//! timebridge sync [--date YYYY-MM-DD] [--dry-run] [--json]
//! timebridge references [people|projects] [--json]
//! ```
//!
//! Credentials are read from `TOGGL_API_TOKEN`, `TOGGL_WORKSPACE_ID`,
//! `TOGGL_USER_AGENT` and `RUNN_API_KEY` (or the matching flags).

mod commands;
mod config;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{references::ReferencesArgs, sync::SyncArgs};
use timebridge_sync::SyncError;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "timebridge",
    version,
    about = "Sync Toggl Track time into Runn actuals",
    long_about = None,
)]
struct Cli {
    /// Write logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post today's (or --date's) Toggl totals to Runn as actuals.
    ///
    /// Runs are not idempotent: syncing the same day twice creates duplicate actuals.
    Sync(SyncArgs),

    /// List Runn people or projects with their Toggl reference.
    References(ReferencesArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Sync(args) => args.run().await,
        Commands::References(args) => args.run().await,
    }
}

/// Log an escaping error, including the upstream body when one was captured.
fn report_error(err: &anyhow::Error) {
    let message = format!("{err:#}");
    let body = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<SyncError>())
        .and_then(SyncError::response_body);

    match body {
        Some(body) => tracing::error!(error = %message, response_body = body, "timebridge failed"),
        None => tracing::error!(error = %message, "timebridge failed"),
    }
}
