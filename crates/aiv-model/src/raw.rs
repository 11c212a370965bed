//! Untyped input records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One input line before resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Zero-based line index in the source.
    pub line: usize,
    pub value: Value,
}

impl RawRecord {
    pub fn new(line: usize, value: Value) -> Self {
        Self { line, value }
    }

    /// Number in-memory values by their position.
    pub fn sequence<I>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(line, value)| Self::new(line, value))
            .collect()
    }

    /// The record's `uuid` when it is a string, regardless of other fields.
    pub fn uuid(&self) -> Option<&str> {
        self.value.get("uuid").and_then(Value::as_str)
    }
}
