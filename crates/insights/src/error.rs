//! Insight aggregator error types

use thiserror::Error;

use contracts::ContractError;

use crate::aggregator::FlushSummary;

/// A table whose insight record could not be written
#[derive(Debug)]
pub struct TableFailure {
    pub table: String,
    pub error: ContractError,
}

/// Errors surfaced to the host from one flush invocation
#[derive(Debug, Error)]
pub enum InsightError {
    /// Sink rejected a record; the rest of the flush was not processed
    #[error("failed to write insights for table '{table}': {source}")]
    Sink {
        table: String,
        #[source]
        source: ContractError,
        /// Totals up to and including the failed table
        summary: FlushSummary,
    },

    /// Some tables failed while the others were written
    #[error(
        "{} of {} insight writes failed",
        .failures.len(),
        attempted(.summary, .failures)
    )]
    PartialFlush {
        summary: FlushSummary,
        failures: Vec<TableFailure>,
    },
}

impl InsightError {
    pub fn sink(table: impl Into<String>, source: ContractError, summary: FlushSummary) -> Self {
        Self::Sink {
            table: table.into(),
            source,
            summary,
        }
    }

    /// Work done before the flush returned
    ///
    /// Records written ahead of an aborting failure stay written.
    pub fn summary(&self) -> &FlushSummary {
        match self {
            Self::Sink { summary, .. } | Self::PartialFlush { summary, .. } => summary,
        }
    }

    /// Names of the tables that were not written
    pub fn failed_tables(&self) -> Vec<&str> {
        match self {
            Self::Sink { table, .. } => vec![table.as_str()],
            Self::PartialFlush { failures, .. } => {
                failures.iter().map(|f| f.table.as_str()).collect()
            }
        }
    }
}

fn attempted(summary: &FlushSummary, failures: &[TableFailure]) -> usize {
    summary.records_written + failures.len()
}
