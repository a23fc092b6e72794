//! LogSink - logs record summary via tracing

use contracts::{ContractError, DataSink, LineRecord};
use tracing::{info, instrument};

/// Sink that logs record summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DataSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_write",
        skip(self, record),
        fields(sink = %self.name, measurement = %record.measurement)
    )]
    fn write(&mut self, record: &LineRecord) -> Result<(), ContractError> {
        info!(
            sink = %self.name,
            tags = ?record.tags,
            fields = ?record.fields,
            "Record received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sink_write() {
        let mut sink = LogSink::new("test_log");
        let record = LineRecord::new("data_insights")
            .tag("source_table", "sensors")
            .int64_field("row_count", 2);

        assert!(sink.write(&record).is_ok());
        assert!(sink.flush().is_ok());
    }

    #[test]
    fn test_log_sink_name() {
        let sink = LogSink::new("my_logger");
        assert_eq!(sink.name(), "my_logger");
    }
}
