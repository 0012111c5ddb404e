//! Command-line shell for the Wayfarer route engine.
//!
//! `wayfarer plan <request.json>` ranks candidate routes for a journey and
//! prints the ranked result as JSON. Options are layered from flags,
//! configuration files and `WAYFARER_*` environment variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;
use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_PLAN_PREFERENCES: &str = "preferences";
const ENV_PLAN_REQUEST: &str = "WAYFARER_CMDS_PLAN_REQUEST_PATH";

/// Run the Wayfarer CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// request cannot be loaded or planned, or the result cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Route recommendation tooling for the Wayfarer engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank candidate routes for a journey described in a JSON file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
