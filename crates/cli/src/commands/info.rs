//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{EngineConfig, FailurePolicy};
use serde::Serialize;
use tracing::info;

use super::load_config;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    insights: InsightsInfo,
    sinks: Vec<SinkInfo>,
}

#[derive(Serialize)]
struct InsightsInfo {
    output_measurement: String,
    time_column: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    excluded_tables: Vec<String>,
    failure_policy: FailurePolicy,
}

#[derive(Serialize)]
struct SinkInfo {
    name: String,
    sink_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    let config = load_config(&args.config)?;

    if args.json {
        let info = build_config_info(&config);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config);
    }

    Ok(())
}

fn build_config_info(config: &EngineConfig) -> ConfigInfo {
    let insights = &config.insights;

    ConfigInfo {
        version: format!("{:?}", config.version),
        insights: InsightsInfo {
            output_measurement: insights.output_measurement.clone(),
            time_column: insights.time_column.clone(),
            excluded_tables: insights.excluded_tables.clone(),
            failure_policy: insights.failure_policy,
        },
        sinks: config
            .sinks
            .iter()
            .map(|s| SinkInfo {
                name: s.name.clone(),
                sink_type: format!("{:?}", s.sink_type),
                path: s.params.get("path").cloned(),
            })
            .collect(),
    }
}

fn print_config_info(config: &EngineConfig) {
    let insights = &config.insights;

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Insight Engine Configuration                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📊 Insights");
    println!("   ├─ Version: {:?}", config.version);
    println!("   ├─ Output measurement: {}", insights.output_measurement);
    println!("   ├─ Time column: {}", insights.time_column);
    println!("   ├─ Failure policy: {:?}", insights.failure_policy);
    if insights.excluded_tables.is_empty() {
        println!("   └─ Excluded tables: (output measurement only)");
    } else {
        println!("   └─ Excluded tables ({}):", insights.excluded_tables.len());
        for (i, table) in insights.excluded_tables.iter().enumerate() {
            let prefix = if i == insights.excluded_tables.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            println!("      {} {}", prefix, table);
        }
    }

    println!("\n📤 Sinks ({})", config.sinks.len());
    if config.sinks.is_empty() {
        println!("   └─ (none, records go to the log)");
    }
    for (i, sink) in config.sinks.iter().enumerate() {
        let prefix = if i == config.sinks.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        match sink.params.get("path") {
            Some(path) => println!("   {} {} ({:?}) -> {}", prefix, sink.name, sink.sink_type, path),
            None => println!("   {} {} ({:?})", prefix, sink.name, sink.sink_type),
        }
    }
}
