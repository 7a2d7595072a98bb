//! CLI command definitions and handlers.

pub mod schema;
pub mod score;

use clap::{Parser, Subcommand};

/// Listing QA - Quality gate for product listing submissions
#[derive(Parser)]
#[command(name = "listing-qa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Score a listing submission and apply the quality gate
    Score(score::ScoreArgs),
    /// Show the required attributes of a category
    Schema(schema::SchemaArgs),
    /// List the categories that have a schema
    Categories,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded; for `score`, the gate passed.
    Success = 0,
    /// The submission scored below the gate threshold.
    GateFailed = 1,
    /// Invalid input or runtime failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
