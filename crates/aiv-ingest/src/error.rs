//! Error types for annotation import ingestion.

use std::path::PathBuf;

use thiserror::Error;

use aiv_model::ValidationError;

/// Errors that can occur while reading or writing import files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a line from a stream.
    #[error("failed to read line {}: {source}", .line + 1)]
    StreamRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    // === Parse Errors ===
    /// A line of an NDJSON file is not valid JSON.
    #[error("line {}: invalid JSON: {message}", .line + 1)]
    InvalidJson { line: usize, message: String },

    /// A JSON document could not be parsed.
    #[error("failed to parse {path}: {message}")]
    JsonParse { path: PathBuf, message: String },

    /// Data-row list has an unexpected shape.
    #[error("invalid data-row list in {path}: {reason}")]
    InvalidDataRows { path: PathBuf, reason: String },

    /// Ontology snapshot could not be indexed.
    #[error("ontology {path}: {source}")]
    Ontology {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    // === Output Errors ===
    /// Refused to write an import with no annotations.
    #[error("annotations cannot be empty")]
    EmptyBatch,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_reports_one_based_line() {
        let err = IngestError::InvalidJson {
            line: 2,
            message: "EOF while parsing an object".to_string(),
        };
        assert_eq!(err.to_string(), "line 3: invalid JSON: EOF while parsing an object");
    }
}
