//! Loaders for the project context: ontology snapshot and data-row ids.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use aiv_ontology::{DataRowSet, ProjectContext, SchemaIndex};

use crate::error::{IngestError, Result};

/// Maximum size of an ontology or data-row file (256 MiB).
pub const MAX_PROJECT_FILE_SIZE: u64 = 256 * 1024 * 1024;

fn read_text(path: &Path) -> Result<String> {
    crate::ndjson::check_file_size(path, MAX_PROJECT_FILE_SIZE)?;
    std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and index an ontology snapshot.
///
/// The snapshot may be bare or wrapped as `{"normalized": {...}}`.
pub fn load_ontology(path: &Path) -> Result<SchemaIndex> {
    let text = read_text(path)?;
    let value: Value = serde_json::from_str(&text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let index = SchemaIndex::from_json(value).map_err(|source| IngestError::Ontology {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        schemas = index.len(),
        skipped = index.skipped().len(),
        depth = index.depth(),
        "loaded ontology"
    );
    Ok(index)
}

/// Load the data-row ids attached to the project.
///
/// Accepts a JSON array of ids, a JSON array of `{id}` / `{uid}` objects, or
/// plain text with one id per line (`#` starts a comment line).
pub fn load_data_rows(path: &Path) -> Result<DataRowSet> {
    let text = read_text(path)?;
    let rows = if text.trim_start().starts_with('[') {
        parse_json_rows(path, &text)?
    } else {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    };
    debug!(path = %path.display(), data_rows = rows.len(), "loaded data rows");
    Ok(rows)
}

fn parse_json_rows(path: &Path, text: &str) -> Result<DataRowSet> {
    let invalid = |reason: String| IngestError::InvalidDataRows {
        path: path.to_path_buf(),
        reason,
    };
    let items: Vec<Value> = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(id) => Ok(id.clone()),
            Value::Object(map) => map
                .get("id")
                .or_else(|| map.get("uid"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("item {idx} has no string id or uid"))),
            _ => Err(invalid(format!(
                "item {idx} is neither an id nor an object with an id"
            ))),
        })
        .collect()
}

/// Load both collaborator files into a project context.
pub fn load_project_context(ontology: &Path, data_rows: &Path) -> Result<ProjectContext> {
    let schemas = load_ontology(ontology)?;
    let rows = load_data_rows(data_rows)?;
    info!(
        schemas = schemas.len(),
        data_rows = rows.len(),
        "project context loaded"
    );
    Ok(ProjectContext::new(schemas, rows))
}
