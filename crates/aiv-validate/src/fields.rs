//! Path-aware readers over untyped JSON fields.
//!
//! Every reader reports the full field path, what it expected and what it
//! found, so a caller can fix a line without re-deriving the cause.

use serde_json::{Map, Value};

use aiv_model::{Point, Result, ValidationError};

/// Short description of a JSON value's type.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Path of `key` under `parent` (`""` is the record root).
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

pub(crate) fn index_path(parent: &str, idx: usize) -> String {
    format!("{parent}[{idx}]")
}

/// Fetch a required field.
pub(crate) fn required<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
    expected: &str,
) -> Result<&'a Value> {
    map.get(key)
        .ok_or_else(|| ValidationError::invalid_field(path, expected, "nothing (field is missing)"))
}

/// Read `key` as a non-empty string.
pub(crate) fn string(map: &Map<String, Value>, parent: &str, key: &str) -> Result<String> {
    let path = child_path(parent, key);
    match required(map, key, &path, "a non-empty string")? {
        Value::String(value) if !value.trim().is_empty() => Ok(value.clone()),
        Value::String(_) => Err(ValidationError::invalid_field(
            path,
            "a non-empty string",
            "an empty string",
        )),
        other => Err(ValidationError::invalid_field(
            path,
            "a non-empty string",
            json_type(other),
        )),
    }
}

/// Read `key` as any number.
pub(crate) fn number(map: &Map<String, Value>, parent: &str, key: &str) -> Result<f64> {
    let path = child_path(parent, key);
    let value = required(map, key, &path, "a number")?;
    value
        .as_f64()
        .ok_or_else(|| ValidationError::invalid_field(path, "a number", json_type(value)))
}

/// Read `key` as an integer.
pub(crate) fn integer(map: &Map<String, Value>, parent: &str, key: &str) -> Result<i64> {
    let path = child_path(parent, key);
    let value = required(map, key, &path, "an integer")?;
    value.as_i64().ok_or_else(|| {
        let found = if value.is_number() {
            format!("{value}")
        } else {
            json_type(value).to_string()
        };
        ValidationError::invalid_field(path, "an integer", found)
    })
}

/// Read `value` as an object carrying exactly `keys`.
pub(crate) fn object<'a>(
    value: &'a Value,
    path: &str,
    keys: &[&str],
) -> Result<&'a Map<String, Value>> {
    let expected = || format!("an object with keys [{}]", keys.join(", "));
    let Value::Object(map) = value else {
        return Err(ValidationError::invalid_field(
            path,
            expected(),
            json_type(value),
        ));
    };
    if let Some(extra) = map.keys().find(|key| !keys.contains(&key.as_str())) {
        return Err(ValidationError::invalid_field(
            path,
            expected(),
            format!("unexpected key {extra}"),
        ));
    }
    Ok(map)
}

/// Read `value` as an array.
pub(crate) fn array<'a>(value: &'a Value, path: &str, expected: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ValidationError::invalid_field(path, expected, json_type(value)))
}

/// Read an `{x, y}` coordinate.
pub(crate) fn point(value: &Value, path: &str) -> Result<Point> {
    let map = object(value, path, &["x", "y"])?;
    Ok(Point {
        x: number(map, path, "x")?,
        y: number(map, path, "y")?,
    })
}

/// Read a list of `{x, y}` coordinates.
pub(crate) fn points(value: &Value, path: &str) -> Result<Vec<Point>> {
    array(value, path, "an array of {x, y} points")?
        .iter()
        .enumerate()
        .map(|(idx, item)| point(item, &index_path(path, idx)))
        .collect()
}

/// Read a `{schemaId}` reference and return the id.
pub(crate) fn schema_ref(value: &Value, path: &str) -> Result<String> {
    let map = object(value, path, &["schemaId"])?;
    string(map, path, "schemaId")
}
