//! Row values as delivered by the host.
//!
//! Values are a closed set so the numeric/non-numeric split is decided by an
//! exhaustive match instead of a runtime type check.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point in time carried by a row (nanoseconds since the Unix epoch)
///
/// Encoded as `{"timestamp_ns": <i64>}` so it cannot be mistaken for an
/// integer or string field when a flush event is decoded from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timestamp {
    pub timestamp_ns: i64,
}

impl Timestamp {
    pub fn from_nanos(timestamp_ns: i64) -> Self {
        Self { timestamp_ns }
    }

    pub fn as_nanos(&self) -> i64 {
        self.timestamp_ns
    }
}

/// A single field value inside a row
///
/// Variant order matters for untagged decoding: JSON integers must land in
/// `Integer` before `Float` gets a chance at them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Timestamp(Timestamp),
    String(String),
}

impl Value {
    /// Numeric view of the value
    ///
    /// Only `Integer` and `Float` participate; booleans never count as numbers.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Boolean(_) | Value::Timestamp(_) | Value::String(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_numeric().is_some()
    }

    /// Type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Timestamp(_) => "timestamp",
            Value::String(_) => "string",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

/// One written row: field name -> value
///
/// Field names are unique within a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Row {
    fn from(fields: [(&str, Value); N]) -> Self {
        fields.into_iter().collect()
    }
}
