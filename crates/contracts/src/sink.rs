//! DataSink trait - output interface of the aggregator
//!
//! Defines the abstract interface for Sinks.

use crate::{ContractError, LineRecord};

/// Data output trait
///
/// All sink implementations must implement this trait. Calls are synchronous:
/// a flush invocation runs to completion without suspension points.
pub trait DataSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one record
    ///
    /// # Errors
    /// Returns write error (should include context)
    fn write(&mut self, record: &LineRecord) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    fn flush(&mut self) -> Result<(), ContractError> {
        Ok(())
    }
}

impl<S: DataSink + ?Sized> DataSink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn write(&mut self, record: &LineRecord) -> Result<(), ContractError> {
        (**self).write(record)
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        (**self).flush()
    }
}
