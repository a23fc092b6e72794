//! `process` command implementation.

use anyhow::{Context, Result};
use contracts::{EngineConfig, FailurePolicy};
use insights::InsightAggregator;
use observability::TracingLogger;
use serde::Serialize;
use sinks::{BoxedSink, FanoutSink, LogSink, MemorySink};
use tracing::info;

use super::load_config;
use crate::cli::ProcessArgs;
use crate::error::CliError;
use crate::replay::{self, parse_events, FlushEvent, ReplayStats};

const PLUGIN_NAME: &str = "wal_insights";

#[derive(Serialize)]
struct DryRunOutput<'a> {
    report: replay::ReplayReport,
    records: &'a [contracts::LineRecord],
}

/// Execute the `process` command
pub async fn run_process(args: &ProcessArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            load_config(path)?
        }
        None => {
            info!("No configuration given, using defaults");
            EngineConfig::default()
        }
    };

    if args.isolate_failures {
        info!("Isolating sink failures per table");
        config.insights.failure_policy = FailurePolicy::Isolate;
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    if !args.input.exists() {
        return Err(CliError::input_not_found(args.input.display().to_string()).into());
    }
    let content = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let events = parse_events(&content)?;

    info!(
        input = %args.input.display(),
        events = events.len(),
        output = %config.insights.output_measurement,
        sinks = config.sinks.len(),
        "Flush events loaded"
    );

    let dry_run = args.dry_run;
    let json = args.json;

    // The aggregator is synchronous; keep it off the async workers
    let stats = tokio::task::spawn_blocking(move || execute(config, events, dry_run, json))
        .await
        .context("Replay task panicked")??;

    if !stats.is_success() {
        return Err(CliError::FlushFailed {
            failed: stats.events_failed,
            total: stats.events_total,
        }
        .into());
    }

    Ok(())
}

fn execute(
    config: EngineConfig,
    events: Vec<FlushEvent>,
    dry_run: bool,
    json: bool,
) -> Result<ReplayStats> {
    let aggregator = InsightAggregator::new(config.insights.clone());
    let logger = TracingLogger::new(PLUGIN_NAME);

    if dry_run {
        let mut sink = MemorySink::new("dry_run");
        let stats = replay::replay_events(&aggregator, &mut sink, &logger, &events);

        if json {
            let output = DryRunOutput {
                report: stats.report(),
                records: sink.records(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize records")?
            );
        } else {
            for record in sink.records() {
                println!(
                    "{}",
                    serde_json::to_string(record).context("Failed to serialize record")?
                );
            }
            stats.print_summary();
        }
        return Ok(stats);
    }

    let mut sink = build_sink(&config)?;
    let stats = replay::replay_events(&aggregator, &mut sink, &logger, &events);

    for (name, metrics) in sink.metrics() {
        info!(
            sink = %name,
            writes = metrics.write_count,
            failures = metrics.failure_count,
            "Sink metrics"
        );
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats.report())
                .context("Failed to serialize replay report")?
        );
    } else {
        stats.print_summary();
    }

    Ok(stats)
}

/// Configured sinks behind one fanout; a log sink when none are configured
fn build_sink(config: &EngineConfig) -> Result<FanoutSink, CliError> {
    if config.sinks.is_empty() {
        let log: BoxedSink = Box::new(LogSink::new("log"));
        return Ok(FanoutSink::with_sinks("fanout", vec![log]));
    }
    Ok(sinks::create_fanout(&config.sinks)?)
}
