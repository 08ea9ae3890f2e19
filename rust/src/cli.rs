//! CLI argument parsing using `clap`.

use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Strategy;

/// Command-line arguments for `jobsched`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobsched",
    version,
    about = "Compute the completion time and schedule of a job made of dependent tasks.",
    long_about = None,
    group(ArgGroup::new("input").required(true).args(["job", "interactive"]))
)]
pub struct CliArgs {
    /// Job file (TOML, or JSON with a `.json` extension).
    #[arg(long, value_name = "PATH")]
    pub job: Option<PathBuf>,

    /// Prompt for the job on stdin.
    #[arg(long)]
    pub interactive: bool,

    /// Number of workers; overrides `workers` from the job file.
    #[arg(long, short = 'w', value_name = "N")]
    pub workers: Option<usize>,

    /// Scheduling strategy; overrides `[scheduler].strategy`.
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Trace scheduling decisions (repeat for more detail, up to -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBSCHED_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
