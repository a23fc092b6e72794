//! FanoutSink - one record to every configured sink

use contracts::{ContractError, DataSink, LineRecord};
use tracing::{debug, instrument, warn};

use crate::factory::BoxedSink;
use crate::metrics::{MetricsSnapshot, SinkMetrics};

struct Child {
    sink: BoxedSink,
    metrics: SinkMetrics,
}

/// Sink that fans each record out to several child sinks
///
/// Every child sees every record even if an earlier child failed; the first
/// failure is returned once all children were tried.
pub struct FanoutSink {
    name: String,
    children: Vec<Child>,
}

impl FanoutSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a fanout over the given sinks
    pub fn with_sinks(name: impl Into<String>, sinks: Vec<BoxedSink>) -> Self {
        let mut fanout = Self::new(name);
        for sink in sinks {
            fanout.push(sink);
        }
        fanout
    }

    pub fn push(&mut self, sink: BoxedSink) {
        self.children.push(Child {
            sink,
            metrics: SinkMetrics::new(),
        });
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.children
            .iter()
            .map(|c| (c.sink.name().to_string(), c.metrics.snapshot()))
            .collect()
    }
}

impl DataSink for FanoutSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "fanout_sink_write",
        skip(self, record),
        fields(sink = %self.name, children = self.children.len())
    )]
    fn write(&mut self, record: &LineRecord) -> Result<(), ContractError> {
        let mut first_error = None;

        for child in &mut self.children {
            match child.sink.write(record) {
                Ok(()) => child.metrics.inc_write_count(),
                Err(e) => {
                    child.metrics.inc_failure_count();
                    warn!(sink = %child.sink.name(), error = %e, "Child sink write failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    #[instrument(name = "fanout_sink_flush", skip(self))]
    fn flush(&mut self) -> Result<(), ContractError> {
        let mut first_error = None;
        for child in &mut self.children {
            if let Err(e) = child.sink.flush() {
                warn!(sink = %child.sink.name(), error = %e, "Child sink flush failed");
                first_error.get_or_insert(e);
            }
        }
        debug!(sink = %self.name, "Fanout flushed");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogSink, MemorySink};

    fn record(table: &str) -> LineRecord {
        LineRecord::new("data_insights").tag("source_table", table)
    }

    #[test]
    fn test_fanout_writes_every_child() {
        let mut fanout = FanoutSink::with_sinks(
            "all",
            vec![
                Box::new(LogSink::new("log")) as BoxedSink,
                Box::new(MemorySink::new("mem")),
            ],
        );

        fanout.write(&record("a")).unwrap();
        fanout.write(&record("b")).unwrap();
        fanout.flush().unwrap();

        let metrics = fanout.metrics();
        assert_eq!(metrics.len(), 2);
        assert!(metrics.iter().all(|(_, m)| m.write_count == 2));
    }

    #[test]
    fn test_failure_does_not_starve_later_children() {
        let mut fanout = FanoutSink::with_sinks(
            "all",
            vec![
                Box::new(MemorySink::new("flaky").failing_for(["a"])) as BoxedSink,
                Box::new(MemorySink::new("steady")),
            ],
        );

        let err = fanout.write(&record("a")).unwrap_err();
        assert!(err.to_string().contains("flaky"));

        let metrics = fanout.metrics();
        assert_eq!(metrics[0].1.failure_count, 1);
        assert_eq!(metrics[1].1.write_count, 1);
    }

    #[test]
    fn test_empty_fanout_accepts() {
        let mut fanout = FanoutSink::new("none");
        assert!(fanout.is_empty());
        assert!(fanout.write(&record("a")).is_ok());
    }
}
