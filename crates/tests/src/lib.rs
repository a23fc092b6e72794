//! # Integration Tests
//!
//! Cross-crate tests for the insight pipeline.
//!
//! Covers:
//! - Contract snapshots (config and record wire shapes)
//! - End-to-end flushes: config -> sinks -> aggregator -> output file

#[cfg(test)]
mod contract_tests {
    use contracts::{EngineConfig, LineRecord, TableBatch, Timestamp, Value};

    #[test]
    fn test_default_config_snapshot() {
        let json = serde_json::to_value(EngineConfig::default()).unwrap();
        assert_eq!(json["insights"]["output_measurement"], "data_insights");
        assert_eq!(json["insights"]["time_column"], "time");
        assert_eq!(json["insights"]["failure_policy"], "abort");
        assert!(json["sinks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_flush_event_wire_shape() {
        let batch: TableBatch = serde_json::from_str(
            r#"{"table_name":"cpu","rows":[{"time":{"timestamp_ns":5},"host":"a","usage":0.5,"up":true,"cores":8}]}"#,
        )
        .unwrap();

        let row = &batch.rows[0];
        assert_eq!(row.get("time"), Some(&Value::Timestamp(Timestamp::from_nanos(5))));
        assert_eq!(row.get("host"), Some(&Value::String("a".into())));
        assert_eq!(row.get("usage"), Some(&Value::Float(0.5)));
        assert_eq!(row.get("up"), Some(&Value::Boolean(true)));
        assert_eq!(row.get("cores"), Some(&Value::Integer(8)));
    }

    #[test]
    fn test_line_record_wire_shape() {
        let record = LineRecord::new("data_insights")
            .tag("source_table", "cpu")
            .int64_field("row_count", 2);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["measurement"], "data_insights");
        assert_eq!(json["tags"]["source_table"], "cpu");
        assert_eq!(json["fields"]["row_count"], 2);
        assert!(json.get("timestamp_ns").is_none());
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{DataSink, FieldValue, LineRecord, Row, TableBatch, Value};
    use insights::{InsightAggregator, InsightError};
    use observability::TracingLogger;
    use sinks::{create_fanout, MemorySink};

    fn row<const N: usize>(fields: [(&str, Value); N]) -> Row {
        Row::from(fields)
    }

    fn float(record: &LineRecord, name: &str) -> Option<f64> {
        record.field(name).and_then(FieldValue::as_f64)
    }

    /// Config file -> fanout (file + log) -> aggregator -> JSON lines on disk
    #[test]
    fn test_e2e_file_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out").join("insights.jsonl");
        let toml = format!(
            r#"
[insights]
excluded_tables = ["audit"]

[[sinks]]
name = "console"
sink_type = "log"

[[sinks]]
name = "archive"
sink_type = "file"
params = {{ path = "{}" }}
"#,
            out.display()
        );

        let config = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        let mut sink = create_fanout(&config.sinks).unwrap();
        let aggregator = InsightAggregator::new(config.insights.clone());
        let logger = TracingLogger::new("wal_insights");

        let batches = vec![
            TableBatch::new(
                "cpu",
                vec![
                    row([("time", Value::Integer(1)), ("usage", Value::Float(10.0))]),
                    row([("time", Value::Integer(2)), ("usage", Value::Float(30.0))]),
                ],
            ),
            TableBatch::new("audit", vec![row([("n", Value::Integer(1))])]),
            TableBatch::new("data_insights", vec![row([("row_count", Value::Integer(3))])]),
            TableBatch::new("events", vec![row([("kind", Value::from("boot"))])]),
        ];

        let summary = aggregator.handle_flush(&mut sink, &logger, &batches).unwrap();
        sink.flush().unwrap();

        assert_eq!(summary.tables_received, 4);
        assert_eq!(summary.tables_skipped, 2);
        assert_eq!(summary.records_written, 2);
        assert_eq!(summary.rows_processed, 3);

        let content = std::fs::read_to_string(&out).unwrap();
        let records: Vec<LineRecord> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);

        let cpu = &records[0];
        assert_eq!(cpu.measurement, "data_insights");
        assert_eq!(cpu.tag_value("source_table"), Some("cpu"));
        assert_eq!(cpu.field("row_count").and_then(FieldValue::as_i64), Some(2));
        assert_eq!(float(cpu, "max_value"), Some(30.0));
        assert_eq!(float(cpu, "min_value"), Some(10.0));
        assert_eq!(float(cpu, "avg_value"), Some(20.0));
        assert!(cpu.field("processed_at").and_then(FieldValue::as_str).is_some());

        let events = &records[1];
        assert_eq!(events.tag_value("source_table"), Some("events"));
        assert_eq!(events.field("row_count").and_then(FieldValue::as_i64), Some(1));
        assert!(events.field("max_value").is_none());
        assert!(events.field("avg_value").is_none());

        let metrics = sink.metrics();
        assert!(metrics.iter().all(|(_, m)| m.write_count == 2));
    }

    /// Output from one flush fed back in as the next flush is ignored
    #[test]
    fn test_e2e_no_feedback_loop() {
        let aggregator = InsightAggregator::default();
        let logger = TracingLogger::new("wal_insights");
        let mut first = MemorySink::new("first");

        let batches = vec![TableBatch::new(
            "weather",
            vec![row([("temp", Value::Float(21.5))])],
        )];
        aggregator.handle_flush(&mut first, &logger, &batches).unwrap();

        let echoed = vec![TableBatch::new(
            "data_insights",
            first
                .records()
                .iter()
                .map(|r| {
                    let count = r.field("row_count").and_then(FieldValue::as_i64).unwrap();
                    row([("row_count", Value::Integer(count))])
                })
                .collect(),
        )];

        let mut second = MemorySink::new("second");
        let summary = aggregator.handle_flush(&mut second, &logger, &echoed).unwrap();
        assert_eq!(summary.tables_skipped, 1);
        assert!(second.records().is_empty());
    }

    /// Isolated failures leave the other tables' records in place
    #[test]
    fn test_e2e_isolated_failure() {
        let config = ConfigLoader::load_from_str(
            r#"{"insights":{"failure_policy":"isolate"}}"#,
            ConfigFormat::Json,
        )
        .unwrap();
        let aggregator = InsightAggregator::new(config.insights);
        let logger = TracingLogger::new("wal_insights");
        let mut sink = MemorySink::new("flaky").failing_for(["b"]);

        let batches: Vec<TableBatch> = ["a", "b", "c"]
            .into_iter()
            .map(|t| TableBatch::new(t, vec![row([("v", Value::Integer(1))])]))
            .collect();

        let err = aggregator.handle_flush(&mut sink, &logger, &batches).unwrap_err();
        match &err {
            InsightError::PartialFlush { summary, failures } => {
                assert_eq!(summary.records_written, 2);
                assert_eq!(failures.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.failed_tables(), vec!["b"]);

        let tables: Vec<_> = sink
            .records()
            .iter()
            .filter_map(|r| r.tag_value("source_table"))
            .collect();
        assert_eq!(tables, vec!["a", "c"]);
    }

    /// Abort stops at the first rejected write
    #[test]
    fn test_e2e_abort_on_failure() {
        let aggregator = InsightAggregator::default();
        let logger = TracingLogger::new("wal_insights");
        let mut sink = MemorySink::new("flaky").failing_for(["b"]);

        let batches: Vec<TableBatch> = ["a", "b", "c"]
            .into_iter()
            .map(|t| TableBatch::new(t, Vec::new()))
            .collect();

        let err = aggregator.handle_flush(&mut sink, &logger, &batches).unwrap_err();
        assert!(matches!(err, InsightError::Sink { ref table, .. } if table == "b"));
        assert_eq!(sink.records().len(), 1);
    }
}
