//! TableBatch - one table's share of a flush event

use serde::{Deserialize, Serialize};

use crate::Row;

/// Rows newly written to one table, delivered in one flush event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBatch {
    /// Table (measurement) the rows were written to
    pub table_name: String,

    /// Rows in write order
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableBatch {
    pub fn new(table_name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            table_name: table_name.into(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_flush_event() {
        let json = r#"[
            {"table_name": "sensors", "rows": [{"time": 1, "temp": 10}, {"time": 2, "temp": 20}]},
            {"table_name": "empty"}
        ]"#;
        let batches: Vec<TableBatch> = serde_json::from_str(json).unwrap();

        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].table_name, "sensors");
        assert_eq!(batches[0].row_count(), 2);
        assert_eq!(batches[1].row_count(), 0);
    }
}
