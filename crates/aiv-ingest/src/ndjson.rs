//! Newline-delimited JSON reading and writing.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use aiv_model::RawRecord;

use crate::error::{IngestError, Result};

/// Maximum NDJSON file size accepted (1 GiB).
pub const MAX_NDJSON_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Check file size against a limit before loading.
pub fn check_file_size(path: &Path, limit: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() > limit {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }
    Ok(())
}

/// Parse NDJSON from a reader.
///
/// Blank lines are skipped; every record keeps its zero-based line index in
/// the source, so reported errors point at the right line.
pub fn read_ndjson<R: BufRead>(reader: R) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for (line, text) in reader.lines().enumerate() {
        let text = text.map_err(|source| IngestError::StreamRead { line, source })?;
        let text = if line == 0 {
            text.trim_start_matches('\u{feff}')
        } else {
            text.as_str()
        };
        if text.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(text).map_err(|e| IngestError::InvalidJson {
            line,
            message: e.to_string(),
        })?;
        records.push(RawRecord::new(line, value));
    }
    Ok(records)
}

/// Read an NDJSON file.
pub fn read_ndjson_file(path: &Path) -> Result<Vec<RawRecord>> {
    check_file_size(path, MAX_NDJSON_FILE_SIZE)?;
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_ndjson(BufReader::new(file))?;
    debug!(path = %path.display(), records = records.len(), "read NDJSON records");
    Ok(records)
}

/// Write one JSON object per line.
pub fn write_ndjson<W: Write>(writer: W, values: &[Value]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for value in values {
        serde_json::to_writer(&mut writer, value)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write an NDJSON file; an empty batch is refused.
pub fn write_ndjson_file(path: &Path, values: &[Value]) -> Result<()> {
    if values.is_empty() {
        return Err(IngestError::EmptyBatch);
    }
    let write_error = |source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let file = File::create(path).map_err(write_error)?;
    write_ndjson(file, values).map_err(write_error)?;
    debug!(path = %path.display(), records = values.len(), "wrote NDJSON records");
    Ok(())
}
