//! CLI command definitions and handlers.

pub mod check;

use clap::{Parser, Subcommand};

/// Photo Gate - Capture-time photo quality scoring
#[derive(Parser)]
#[command(name = "photo-gate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Score images and report whether they pass the quality gate
    Check(check::CheckArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image passed.
    Success = 0,
    /// At least one image failed the gate.
    Failed = 1,
    /// Usage, I/O or output error.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
