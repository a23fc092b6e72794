//! Replay statistics.

use std::time::Duration;

use insights::FlushSummary;
use serde::Serialize;

/// Statistics from a replay run
#[derive(Debug, Clone, Default)]
pub struct ReplayStats {
    /// Flush events delivered to the aggregator
    pub events_total: usize,

    /// Events whose invocation returned an error
    pub events_failed: usize,

    /// Merged aggregator counters
    pub summary: FlushSummary,

    /// Tables whose record was not written
    pub failed_tables: Vec<String>,

    /// Final sink flush error, if any
    pub flush_error: Option<String>,

    /// Total duration of the replay
    pub duration: Duration,
}

/// JSON view of a replay run
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub events_total: usize,
    pub events_failed: usize,
    pub tables_received: usize,
    pub tables_skipped: usize,
    pub records_written: usize,
    pub rows_processed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_tables: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flush_error: Option<String>,
    pub duration_ms: f64,
}

impl ReplayStats {
    /// Records written per second of replay
    pub fn records_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.summary.records_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn is_success(&self) -> bool {
        self.events_failed == 0 && self.flush_error.is_none()
    }

    pub fn report(&self) -> ReplayReport {
        ReplayReport {
            events_total: self.events_total,
            events_failed: self.events_failed,
            tables_received: self.summary.tables_received,
            tables_skipped: self.summary.tables_skipped,
            records_written: self.summary.records_written,
            rows_processed: self.summary.rows_processed,
            failed_tables: self.failed_tables.clone(),
            flush_error: self.flush_error.clone(),
            duration_ms: self.duration.as_secs_f64() * 1000.0,
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Replay Statistics                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.3}s", self.duration.as_secs_f64());
        println!("   ├─ Flush events: {}", self.events_total);
        println!("   ├─ Failed events: {}", self.events_failed);
        println!("   └─ Records/s: {:.2}", self.records_per_sec());

        println!("\n📈 Aggregator");
        println!("   ├─ Tables received: {}", self.summary.tables_received);
        println!("   ├─ Tables skipped: {}", self.summary.tables_skipped);
        println!("   ├─ Rows processed: {}", self.summary.rows_processed);
        println!("   └─ Records written: {}", self.summary.records_written);

        if !self.failed_tables.is_empty() {
            println!("\n⚠️  Failed Tables");
            for table in &self.failed_tables {
                println!("   ├─ {}", table);
            }
        }

        if let Some(ref e) = self.flush_error {
            println!("\n⚠️  Final flush failed: {}", e);
        }

        println!();
    }
}
