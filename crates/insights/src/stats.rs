//! Streaming per-table statistics.

use contracts::Row;

/// Running statistics over one table batch
///
/// Numeric values of every field are pooled into a single set; a `count`
/// column and a `temperature` column land in the same min/max/avg.
#[derive(Debug, Clone)]
pub struct TableStats {
    row_count: usize,
    numeric_count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for TableStats {
    fn default() -> Self {
        Self {
            row_count: 0,
            numeric_count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

/// Final numbers of a batch that had at least one numeric value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub max: f64,
    pub min: f64,
    /// Sum divided by row count; `None` for zero rows
    pub avg: Option<f64>,
}

impl TableStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one row, skipping `time_column` and non-numeric values
    pub fn observe_row(&mut self, row: &Row, time_column: &str) {
        self.row_count += 1;
        for (name, value) in row.iter() {
            if name == time_column {
                continue;
            }
            if let Some(v) = value.as_numeric() {
                self.observe(v);
            }
        }
    }

    /// Account for one numeric value
    ///
    /// Non-finite values (NaN, infinities) do not participate.
    pub fn observe(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.numeric_count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of numeric values pooled so far
    pub fn numeric_count(&self) -> u64 {
        self.numeric_count
    }

    pub fn has_numeric(&self) -> bool {
        self.numeric_count > 0
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn summary(&self) -> Option<NumericSummary> {
        if !self.has_numeric() {
            return None;
        }

        let avg = (self.row_count > 0).then(|| self.sum / self.row_count as f64);
        Some(NumericSummary {
            max: self.max,
            min: self.min,
            avg,
        })
    }
}
