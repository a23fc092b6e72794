//! MemorySink - keeps records in memory

use std::collections::HashSet;

use contracts::{ContractError, DataSink, LineRecord};

/// Sink that captures records instead of persisting them
///
/// Used by dry runs and tests. Records whose `source_table` tag is listed in
/// `failing_for` are rejected, which makes sink failures reproducible.
#[derive(Debug, Default)]
pub struct MemorySink {
    name: String,
    records: Vec<LineRecord>,
    failing_tables: HashSet<String>,
}

impl MemorySink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Reject records produced for these source tables
    pub fn failing_for<I, T>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.failing_tables
            .extend(tables.into_iter().map(Into::into));
        self
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<LineRecord> {
        self.records
    }
}

impl DataSink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&mut self, record: &LineRecord) -> Result<(), ContractError> {
        if let Some(table) = record
            .tag_value("source_table")
            .filter(|t| self.failing_tables.contains(*t))
        {
            return Err(ContractError::sink_write(
                &self.name,
                format!("rejected record for table '{table}'"),
            ));
        }

        self.records.push(record.clone());
        Ok(())
    }
}
