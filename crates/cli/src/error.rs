//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Input file not found
    #[error("Flush event file not found: {path}")]
    InputNotFound { path: String },

    /// Flush event line could not be decoded
    #[error("Invalid flush event on line {line}: {message}")]
    InputParse { line: usize, message: String },

    /// Some flush events surfaced errors to the host
    #[error("{failed} of {total} flush events failed")]
    FlushFailed { failed: usize, total: usize },

    /// Sink construction or final flush failed
    #[error("Sink error: {0}")]
    Sink(#[from] sinks::SinkError),

    /// Contract-level error (config, sink write)
    #[error(transparent)]
    Contract(#[from] contracts::ContractError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    pub fn input_parse(line: usize, message: impl Into<String>) -> Self {
        Self::InputParse {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
