//! FileSink - appends records to disk as JSON lines

use contracts::{ContractError, DataSink, LineRecord};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

use crate::error::SinkError;

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Output file (one JSON record per line)
    pub path: PathBuf,
}

impl FileSinkConfig {
    /// Create config from params map; `None` without a `path` param
    pub fn from_params(params: &HashMap<String, String>) -> Option<Self> {
        params.get("path").map(|path| Self {
            path: PathBuf::from(path),
        })
    }
}

/// Sink that appends records to a JSON lines file
pub struct FileSink {
    name: String,
    config: FileSinkConfig,
    writer: BufWriter<File>,
    lines_written: u64,
}

impl FileSink {
    /// Open (or create) the output file in append mode
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;

        Ok(Self {
            name: name.into(),
            config,
            writer: BufWriter::new(file),
            lines_written: 0,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, SinkError> {
        let name = name.into();
        let config = FileSinkConfig::from_params(params)
            .ok_or_else(|| SinkError::sink_creation(&name, "missing 'path' param"))?;
        Self::new(name.clone(), config).map_err(|e| SinkError::sink_creation(name, e.to_string()))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.config.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn append_line(&mut self, record: &LineRecord) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }
}

impl DataSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_write",
        skip(self, record),
        fields(sink = %self.name, measurement = %record.measurement)
    )]
    fn write(&mut self, record: &LineRecord) -> Result<(), ContractError> {
        self.append_line(record).map_err(|e| {
            error!(sink = %self.name, path = %self.config.path.display(), error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })
    }

    #[instrument(name = "file_sink_flush", skip(self))]
    fn flush(&mut self) -> Result<(), ContractError> {
        self.writer
            .flush()
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        debug!(sink = %self.name, lines = self.lines_written, "FileSink flushed");
        Ok(())
    }
}
