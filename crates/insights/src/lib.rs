//! # Insights
//!
//! WAL-flush insight aggregator.
//!
//! Responsibilities:
//! - Skip the output measurement (and configured tables) to avoid feedback loops
//! - Pool every numeric, non-time field of a table batch into one min/max/avg set
//! - Emit exactly one `LineRecord` per remaining table, in input order
//!
//! ## Usage
//!
//! ```ignore
//! use insights::{InsightAggregator, InsightsConfig};
//!
//! let aggregator = InsightAggregator::new(InsightsConfig::default());
//! let summary = aggregator.handle_flush(&mut sink, &logger, &batches)?;
//! ```

mod aggregator;
mod error;
mod insight;
mod stats;

pub use aggregator::{handle_flush, Clock, FlushSummary, InsightAggregator};
pub use error::{InsightError, TableFailure};
pub use insight::{Insight, PROCESSED_AT_FIELD, ROW_COUNT_FIELD, SOURCE_TABLE_TAG};
pub use stats::{NumericSummary, TableStats};

// Re-export contracts types
pub use contracts::{FailurePolicy, InsightsConfig, LineRecord, Row, TableBatch, Value};
