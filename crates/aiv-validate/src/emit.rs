//! Validated records ready to be written back out.

use serde_json::{Map, Value, json};

use aiv_model::Annotation;

/// A record that passed every check.
///
/// Keeps the input object so output preserves field order and values.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    /// Zero-based line index in the input.
    pub line: usize,
    pub annotation: Annotation,
    raw: Map<String, Value>,
}

impl ValidatedRecord {
    pub(crate) fn new(line: usize, annotation: Annotation, raw: Map<String, Value>) -> Self {
        Self {
            line,
            annotation,
            raw,
        }
    }

    /// The record as received.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Output form: the input object with placeholders filled into each
    /// nested classification.
    pub fn to_json(&self) -> Value {
        let mut out = self.raw.clone();
        if let Some(Value::Array(items)) = out.get_mut("classifications") {
            for (item, nested) in items.iter_mut().zip(&self.annotation.classifications) {
                if let Value::Object(fields) = item {
                    fields.insert("uuid".to_string(), Value::String(nested.uuid.clone()));
                    fields.insert("dataRow".to_string(), json!({"id": nested.data_row_id}));
                }
            }
        }
        Value::Object(out)
    }
}
