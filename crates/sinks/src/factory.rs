//! Build sinks from configuration

use contracts::{DataSink, SinkConfig, SinkType};
use tracing::instrument;

use crate::error::SinkError;
use crate::fanout::FanoutSink;
use crate::file::FileSink;
use crate::log::LogSink;

/// Owned, type-erased sink
pub type BoxedSink = Box<dyn DataSink + Send>;

/// Create a sink from configuration
#[instrument(
    name = "sinks_create_sink",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
pub fn create_sink(config: &SinkConfig) -> Result<BoxedSink, SinkError> {
    match config.sink_type {
        SinkType::Log => Ok(Box::new(LogSink::new(&config.name))),
        SinkType::File => {
            let sink = FileSink::from_params(&config.name, &config.params)?;
            Ok(Box::new(sink))
        }
    }
}

/// Create one fanout sink over all configured sinks
#[instrument(name = "sinks_create_fanout", skip(configs), fields(sink_count = configs.len()))]
pub fn create_fanout(configs: &[SinkConfig]) -> Result<FanoutSink, SinkError> {
    let sinks = configs
        .iter()
        .map(create_sink)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FanoutSink::with_sinks("fanout", sinks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_create_log_sink() {
        let config = SinkConfig {
            name: "test_log".to_string(),
            sink_type: SinkType::Log,
            params: HashMap::new(),
        };
        let sink = create_sink(&config).unwrap();
        assert_eq!(sink.name(), "test_log");
    }

    #[test]
    fn test_create_fanout_from_config() {
        let dir = tempdir().unwrap();
        let configs = vec![
            SinkConfig {
                name: "log".to_string(),
                sink_type: SinkType::Log,
                params: HashMap::new(),
            },
            SinkConfig {
                name: "file".to_string(),
                sink_type: SinkType::File,
                params: HashMap::from([(
                    "path".to_string(),
                    dir.path().join("out.jsonl").display().to_string(),
                )]),
            },
        ];

        let fanout = create_fanout(&configs).unwrap();
        assert_eq!(fanout.len(), 2);
        assert_eq!(fanout.metrics()[1].0, "file");
    }

    #[test]
    fn test_file_sink_creation_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened as an append-only file
        let config = SinkConfig {
            name: "broken".to_string(),
            sink_type: SinkType::File,
            params: HashMap::from([("path".to_string(), dir.path().display().to_string())]),
        };
        let err = create_sink(&config).err().unwrap();
        assert!(matches!(err, SinkError::SinkCreation { ref name, .. } if name == "broken"));
    }
}
