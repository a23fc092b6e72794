//! Insight - one table's summary, ready to become a line record

use chrono::{DateTime, SecondsFormat, Utc};
use contracts::LineRecord;

use crate::stats::NumericSummary;

pub const SOURCE_TABLE_TAG: &str = "source_table";
pub const ROW_COUNT_FIELD: &str = "row_count";
pub const MAX_VALUE_FIELD: &str = "max_value";
pub const MIN_VALUE_FIELD: &str = "min_value";
pub const AVG_VALUE_FIELD: &str = "avg_value";
pub const PROCESSED_AT_FIELD: &str = "processed_at";

/// Summary of one table batch
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    /// Table the rows came from
    pub source_table: String,

    /// Exact number of rows in the batch
    pub row_count: usize,

    /// Present only when at least one numeric value was seen
    pub stats: Option<NumericSummary>,

    /// Emission time
    pub processed_at: DateTime<Utc>,
}

impl Insight {
    /// ISO-8601 UTC rendering of `processed_at`
    pub fn processed_at_iso(&self) -> String {
        self.processed_at
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// Build the record written to `measurement`
    ///
    /// Stat fields are left out entirely when the batch had no numbers.
    pub fn to_line_record(&self, measurement: &str) -> LineRecord {
        let mut record = LineRecord::new(measurement)
            .tag(SOURCE_TABLE_TAG, self.source_table.as_str())
            .int64_field(ROW_COUNT_FIELD, self.row_count as i64);

        if let Some(stats) = &self.stats {
            record = record
                .float64_field(MAX_VALUE_FIELD, stats.max)
                .float64_field(MIN_VALUE_FIELD, stats.min);
            if let Some(avg) = stats.avg {
                record = record.float64_field(AVG_VALUE_FIELD, avg);
            }
        }

        record.string_field(PROCESSED_AT_FIELD, self.processed_at_iso())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::FieldValue;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_record_with_stats() {
        let insight = Insight {
            source_table: "sensors".into(),
            row_count: 2,
            stats: Some(NumericSummary {
                max: 20.0,
                min: 10.0,
                avg: Some(15.0),
            }),
            processed_at: fixed_time(),
        };

        let record = insight.to_line_record("data_insights");
        assert_eq!(record.measurement, "data_insights");
        assert_eq!(record.tag_value("source_table"), Some("sensors"));
        assert_eq!(record.field("row_count"), Some(&FieldValue::Integer(2)));
        assert_eq!(record.field("max_value"), Some(&FieldValue::Float(20.0)));
        assert_eq!(record.field("min_value"), Some(&FieldValue::Float(10.0)));
        assert_eq!(record.field("avg_value"), Some(&FieldValue::Float(15.0)));
        assert_eq!(
            record.field("processed_at").and_then(FieldValue::as_str),
            Some("2025-03-14T09:26:53.000000Z")
        );
        assert_eq!(record.timestamp_ns, None);
    }

    #[test]
    fn test_record_without_stats() {
        let insight = Insight {
            source_table: "events".into(),
            row_count: 1,
            stats: None,
            processed_at: fixed_time(),
        };

        let record = insight.to_line_record("data_insights");
        assert_eq!(record.fields.len(), 2);
        assert!(record.field("max_value").is_none());
        assert!(record.field("min_value").is_none());
        assert!(record.field("avg_value").is_none());
    }

    #[test]
    fn test_missing_average_is_omitted() {
        let insight = Insight {
            source_table: "t".into(),
            row_count: 0,
            stats: Some(NumericSummary {
                max: 1.0,
                min: 1.0,
                avg: None,
            }),
            processed_at: fixed_time(),
        };

        let record = insight.to_line_record("out");
        assert!(record.field("max_value").is_some());
        assert!(record.field("avg_value").is_none());
    }
}
