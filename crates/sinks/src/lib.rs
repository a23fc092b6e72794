//! # Sinks
//!
//! `DataSink` implementations for insight records.
//!
//! - `LogSink`: tracing summary per record
//! - `FileSink`: JSON lines on disk
//! - `MemorySink`: in-memory capture for dry runs and tests
//! - `FanoutSink`: one record to many sinks, per-child metrics

pub mod error;
pub mod factory;
pub mod fanout;
pub mod file;
pub mod log;
pub mod memory;
pub mod metrics;

pub use contracts::{DataSink, LineRecord};
pub use error::SinkError;
pub use factory::{create_fanout, create_sink, BoxedSink};
pub use fanout::FanoutSink;
pub use file::{FileSink, FileSinkConfig};
pub use log::LogSink;
pub use memory::MemorySink;
pub use metrics::{MetricsSnapshot, SinkMetrics};
