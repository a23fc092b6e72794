//! Flush handler metrics
//!
//! Thin wrappers over the `metrics` facade so metric names live in one place.
//! Without an installed recorder every call is a no-op.

use metrics::{counter, histogram};

/// Record a table batch that produced an insight
pub fn record_table_processed(table: &str, rows: usize) {
    counter!(
        "wal_insights_tables_processed_total",
        "table" => table.to_string()
    )
    .increment(1);
    counter!(
        "wal_insights_rows_processed_total",
        "table" => table.to_string()
    )
    .increment(rows as u64);
}

/// Record a table batch skipped by the exclusion rules
pub fn record_table_skipped(table: &str) {
    counter!(
        "wal_insights_tables_skipped_total",
        "table" => table.to_string()
    )
    .increment(1);
}

/// Record an insight record accepted by the sink
pub fn record_insight_written(sink_name: &str) {
    counter!(
        "wal_insights_records_written_total",
        "sink" => sink_name.to_string()
    )
    .increment(1);
}

/// Record a rejected sink write
pub fn record_sink_failure(sink_name: &str, table: &str) {
    counter!(
        "wal_insights_sink_failures_total",
        "sink" => sink_name.to_string(),
        "table" => table.to_string()
    )
    .increment(1);
}

/// Record wall time of one flush invocation
pub fn record_flush_duration_ms(duration_ms: f64) {
    histogram!("wal_insights_flush_duration_ms").record(duration_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_table_processed("sensors", 2);
        record_table_skipped("data_insights");
        record_insight_written("log");
        record_sink_failure("file", "sensors");
        record_flush_duration_ms(0.4);
    }
}
