//! Command-line routing layer for the Ridewise engine.
//!
//! The CLI is the "thin I/O" collaborator around the engine: it resolves
//! configuration, drives the fetch → resolve → recommend pipeline, and
//! serialises the response as JSON. All decision logic lives in
//! `ridewise-core`.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use thiserror::Error;

use ridewise_core::{ConfigError, ParkDataError};
use ridewise_data::{ProviderBuildError, SummaryBuildError};

mod recommend;

pub use recommend::RecommendArgs;

/// Run the Ridewise CLI with the current process arguments.
///
/// # Errors
/// Returns [`CliError`] for argument, configuration, and upstream data
/// failures; the binary prints the error and exits non-zero.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => {
            let mut stdout = std::io::stdout().lock();
            recommend::run_recommend(&args, &mut stdout)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ridewise",
    about = "Theme-park ride recommendations from live park data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend rides for a visitor's location and priority.
    Recommend(RecommendArgs),
}

/// Errors emitted by the Ridewise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// The requested park or land is not configured. A caller mistake,
    /// surfaced before any network access.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Building an HTTP collaborator failed.
    #[error("failed to build provider: {0}")]
    BuildProvider(#[from] ProviderBuildError),
    /// Building the summary client failed.
    #[error("failed to build summariser: {0}")]
    BuildSummarizer(#[from] SummaryBuildError),
    /// Upstream park data could not be fetched or decoded. The user-facing
    /// message stays generic; the detailed diagnostic is logged.
    #[error("recommendation data unavailable")]
    DataUnavailable {
        /// The underlying provider failure.
        #[source]
        source: ParkDataError,
    },
    /// Serialising the response failed.
    #[error("failed to serialise response: {0}")]
    SerializeResponse(#[source] serde_json::Error),
    /// Writing the response failed.
    #[error("failed to write response: {0}")]
    WriteOutput(#[source] std::io::Error),
}
