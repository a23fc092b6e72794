//! EngineConfig - Config Loader output
//!
//! Describes how flush events are summarized and where the records go.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Measurement the aggregator writes into (and therefore never reads from)
pub const DEFAULT_OUTPUT_MEASUREMENT: &str = "data_insights";

/// Reserved timestamp column, never aggregated
pub const DEFAULT_TIME_COLUMN: &str = "time";

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Aggregation settings
    #[serde(default)]
    pub insights: InsightsConfig,

    /// Output routing
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// Aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Measurement receiving the insight records
    #[serde(default = "default_output_measurement")]
    pub output_measurement: String,

    /// Column excluded from numeric aggregation
    #[serde(default = "default_time_column")]
    pub time_column: String,

    /// Extra tables to skip besides the output measurement
    #[serde(default)]
    pub excluded_tables: Vec<String>,

    /// What a failed sink write does to the rest of the flush
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_output_measurement() -> String {
    DEFAULT_OUTPUT_MEASUREMENT.to_string()
}

fn default_time_column() -> String {
    DEFAULT_TIME_COLUMN.to_string()
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            output_measurement: default_output_measurement(),
            time_column: default_time_column(),
            excluded_tables: Vec::new(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Sink failure handling within one flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failed write and surface it
    #[default]
    Abort,
    /// Keep going with the remaining tables, surface all failures at the end
    Isolate,
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    pub sink_type: SinkType,

    /// Type specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Log output
    Log,
    /// JSON lines file output
    File,
}
