//! Config validation
//!
//! Rules:
//! - output_measurement / time_column not empty
//! - excluded table names not empty
//! - sink names not empty and unique
//! - file sinks carry a `path` param

use std::collections::HashSet;

use contracts::{ContractError, EngineConfig, SinkType};

/// Validate an EngineConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &EngineConfig) -> Result<(), ContractError> {
    validate_insights(config)?;
    validate_sinks(config)?;
    Ok(())
}

fn validate_insights(config: &EngineConfig) -> Result<(), ContractError> {
    let insights = &config.insights;

    if insights.output_measurement.trim().is_empty() {
        return Err(ContractError::config_validation(
            "insights.output_measurement",
            "output measurement cannot be empty",
        ));
    }

    if insights.time_column.trim().is_empty() {
        return Err(ContractError::config_validation(
            "insights.time_column",
            "time column cannot be empty",
        ));
    }

    for (idx, table) in insights.excluded_tables.iter().enumerate() {
        if table.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("insights.excluded_tables[{idx}]"),
                "excluded table name cannot be empty",
            ));
        }
    }

    Ok(())
}

fn validate_sinks(config: &EngineConfig) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, sink) in config.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(ContractError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }

        if !seen.insert(sink.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }

        if sink.sink_type == SinkType::File
            && sink.params.get("path").is_none_or(|p| p.trim().is_empty())
        {
            return Err(ContractError::config_validation(
                format!("sinks[{}].params.path", sink.name),
                "file sink requires a 'path' param",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{InsightsConfig, SinkConfig};
    use std::collections::HashMap;

    fn sink(name: &str, sink_type: SinkType) -> SinkConfig {
        SinkConfig {
            name: name.into(),
            sink_type,
            params: HashMap::new(),
        }
    }

    fn minimal_config() -> EngineConfig {
        EngineConfig {
            sinks: vec![sink("log", SinkType::Log)],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&minimal_config()).is_ok());
    }

    #[test]
    fn test_empty_output_measurement() {
        let mut config = minimal_config();
        config.insights.output_measurement = "  ".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("insights.output_measurement"));
    }

    #[test]
    fn test_empty_time_column() {
        let config = EngineConfig {
            insights: InsightsConfig {
                time_column: String::new(),
                ..Default::default()
            },
            ..minimal_config()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_excluded_table() {
        let mut config = minimal_config();
        config.insights.excluded_tables = vec!["audit".into(), "".into()];
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("excluded_tables[1]"));
    }

    #[test]
    fn test_duplicate_sink_name() {
        let mut config = minimal_config();
        config.sinks.push(sink("log", SinkType::Log));
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_sink_name() {
        let mut config = minimal_config();
        config.sinks[0].name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_file_sink_requires_path() {
        let mut config = minimal_config();
        config.sinks.push(sink("out", SinkType::File));
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("path"));

        config.sinks[1]
            .params
            .insert("path".into(), "./out.jsonl".into());
        assert!(validate(&config).is_ok());
    }
}
