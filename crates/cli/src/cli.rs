//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Insight Engine - WAL flush insight aggregator host
#[derive(Parser, Debug)]
#[command(
    name = "insight-engine",
    author,
    version,
    about = "Replay WAL flush events through the insight aggregator",
    long_about = "Runs the WAL-flush insight aggregator outside the database engine.\n\n\
                  Reads flush events from a JSON lines file (one event per line, each an \n\
                  array of table batches), summarizes every table and writes the \n\
                  resulting records to the configured sinks."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "INSIGHT_ENGINE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "INSIGHT_ENGINE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay flush events through the aggregator
    Process(ProcessArgs),

    /// Validate configuration file without processing
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `process` command
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Path to configuration file (TOML or JSON); built-in defaults when omitted
    #[arg(short, long, env = "INSIGHT_ENGINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Flush events, one JSON array of table batches per line
    #[arg(short, long, env = "INSIGHT_ENGINE_INPUT")]
    pub input: PathBuf,

    /// Capture records in memory and print them instead of writing to sinks
    #[arg(long)]
    pub dry_run: bool,

    /// Keep processing remaining tables when a sink write fails
    #[arg(long)]
    pub isolate_failures: bool,

    /// Output run summary (and dry-run records) as JSON
    #[arg(long)]
    pub json: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "INSIGHT_ENGINE_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "insights.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "insights.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
