//! Command implementations.

mod info;
mod process;
mod validate;

pub use info::run_info;
pub use process::run_process;
pub use validate::run_validate;

use std::path::Path;

use anyhow::{Context, Result};
use contracts::{EngineConfig, DEFAULT_OUTPUT_MEASUREMENT};

use crate::error::CliError;

/// Load and validate a configuration file
fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()).into());
    }

    config_loader::ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &EngineConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.sinks.is_empty() {
        warnings.push("No sinks configured - insight records will only be logged".to_string());
    }

    let insights = &config.insights;
    for table in insights
        .excluded_tables
        .iter()
        .filter(|t| *t == &insights.output_measurement || *t == DEFAULT_OUTPUT_MEASUREMENT)
    {
        warnings.push(format!(
            "excluded_tables lists '{table}', which is always excluded as an output measurement"
        ));
    }

    if insights.output_measurement == insights.time_column {
        warnings.push(format!(
            "output_measurement and time_column are both '{}'",
            insights.time_column
        ));
    }

    warnings
}
