//! Batch insight aggregator - the WAL flush callback.

use std::time::Instant;

use chrono::{DateTime, Utc};
use contracts::{
    DataSink, FailurePolicy, InsightsConfig, PluginLogger, TableBatch, DEFAULT_OUTPUT_MEASUREMENT,
};
use tracing::{debug, instrument, warn};

use crate::error::{InsightError, TableFailure};
use crate::insight::Insight;
use crate::stats::TableStats;

/// Source of the `processed_at` wall-clock time
pub type Clock = fn() -> DateTime<Utc>;

/// Counters for one (or several merged) flush invocations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    /// Table batches delivered by the host
    pub tables_received: usize,
    /// Batches skipped by the exclusion rules
    pub tables_skipped: usize,
    /// Records accepted by the sink
    pub records_written: usize,
    /// Rows of non-excluded batches
    pub rows_processed: usize,
}

impl FlushSummary {
    /// Fold another summary into this one
    pub fn merge(&mut self, other: &FlushSummary) {
        self.tables_received += other.tables_received;
        self.tables_skipped += other.tables_skipped;
        self.records_written += other.records_written;
        self.rows_processed += other.rows_processed;
    }
}

/// Turns flush events into insight records
///
/// Holds configuration only; nothing carries over between invocations.
#[derive(Debug, Clone)]
pub struct InsightAggregator {
    config: InsightsConfig,
    clock: Clock,
}

impl Default for InsightAggregator {
    fn default() -> Self {
        Self::new(InsightsConfig::default())
    }
}

impl InsightAggregator {
    pub fn new(config: InsightsConfig) -> Self {
        Self {
            config,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock (deterministic `processed_at` in tests and replays)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Whether a table is never read from
    ///
    /// The output measurement is always excluded so emitted records cannot
    /// feed back into the next flush. `data_insights` stays excluded when
    /// the output is renamed.
    pub fn is_excluded(&self, table: &str) -> bool {
        table == self.config.output_measurement
            || table == DEFAULT_OUTPUT_MEASUREMENT
            || self.config.excluded_tables.iter().any(|t| t == table)
    }

    /// Compute the insight for one batch
    pub fn summarize(&self, batch: &TableBatch) -> Insight {
        let mut stats = TableStats::new();
        for row in &batch.rows {
            stats.observe_row(row, &self.config.time_column);
        }

        Insight {
            source_table: batch.table_name.clone(),
            row_count: stats.row_count(),
            stats: stats.summary(),
            processed_at: (self.clock)(),
        }
    }

    /// Process one flush event
    ///
    /// Writes exactly one record per non-excluded batch, in input order.
    ///
    /// # Errors
    /// - `FailurePolicy::Abort`: the first rejected write, remaining batches untouched
    /// - `FailurePolicy::Isolate`: every rejected write, after all batches were tried
    #[instrument(
        name = "insights_handle_flush",
        skip_all,
        fields(tables = batches.len(), sink = %sink.name())
    )]
    pub fn handle_flush<S, L>(
        &self,
        sink: &mut S,
        logger: &L,
        batches: &[TableBatch],
    ) -> Result<FlushSummary, InsightError>
    where
        S: DataSink + ?Sized,
        L: PluginLogger + ?Sized,
    {
        let started = Instant::now();
        let mut summary = FlushSummary {
            tables_received: batches.len(),
            ..Default::default()
        };
        let mut failures = Vec::new();

        logger.info(&format!(
            "Processing flush event with {} table batch(es)",
            batches.len()
        ));

        for batch in batches {
            let table = batch.table_name.as_str();

            if self.is_excluded(table) {
                debug!(table, "Skipping excluded table");
                observability::record_table_skipped(table);
                summary.tables_skipped += 1;
                continue;
            }

            logger.info(&format!(
                "Processing {} rows from table {}",
                batch.row_count(),
                table
            ));

            let insight = self.summarize(batch);
            let record = insight.to_line_record(&self.config.output_measurement);
            summary.rows_processed += insight.row_count;
            observability::record_table_processed(table, insight.row_count);

            match sink.write(&record) {
                Ok(()) => {
                    summary.records_written += 1;
                    observability::record_insight_written(sink.name());
                    logger.info(&format!("Generated insights for {table}"));
                }
                Err(error) => {
                    observability::record_sink_failure(sink.name(), table);
                    match self.config.failure_policy {
                        FailurePolicy::Abort => {
                            warn!(table, %error, "Sink write failed, aborting flush");
                            record_elapsed(started);
                            return Err(InsightError::sink(table, error, summary));
                        }
                        FailurePolicy::Isolate => {
                            logger.warn(&format!(
                                "Failed to write insights for {table}: {error}"
                            ));
                            failures.push(TableFailure {
                                table: table.to_string(),
                                error,
                            });
                        }
                    }
                }
            }
        }

        record_elapsed(started);

        if failures.is_empty() {
            Ok(summary)
        } else {
            Err(InsightError::PartialFlush { summary, failures })
        }
    }
}

fn record_elapsed(started: Instant) {
    observability::record_flush_duration_ms(started.elapsed().as_secs_f64() * 1000.0);
}

/// Flush callback with the default configuration
///
/// Output goes to `data_insights`; the `time` column is never aggregated;
/// the first sink failure aborts the flush.
pub fn handle_flush<S, L>(
    sink: &mut S,
    logger: &L,
    batches: &[TableBatch],
) -> Result<FlushSummary, InsightError>
where
    S: DataSink + ?Sized,
    L: PluginLogger + ?Sized,
{
    InsightAggregator::default().handle_flush(sink, logger, batches)
}
