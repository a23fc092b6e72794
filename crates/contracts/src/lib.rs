//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data Flow
//! - The host delivers one flush event as an ordered `Vec<TableBatch>`
//! - The insight aggregator turns each batch into one `LineRecord`
//! - Records leave through an injected `DataSink`; messages through a `PluginLogger`

mod batch;
mod config;
mod error;
mod logger;
mod record;
mod sink;
mod value;

pub use batch::TableBatch;
pub use config::*;
pub use error::*;
pub use logger::PluginLogger;
pub use record::{FieldValue, LineRecord};
pub use sink::DataSink;
pub use value::{Row, Timestamp, Value};
