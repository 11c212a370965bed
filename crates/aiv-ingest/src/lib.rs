//! Annotation import ingestion.
//!
//! - **NDJSON**: read records with their line index, write validated records
//! - **Project files**: ontology snapshot and data-row id list

mod error;
mod ndjson;
mod project;

// === Error Types ===
pub use error::{IngestError, Result};

// === NDJSON ===
pub use ndjson::{
    MAX_NDJSON_FILE_SIZE, check_file_size, read_ndjson, read_ndjson_file, write_ndjson,
    write_ndjson_file,
};

// === Project Files ===
pub use project::{MAX_PROJECT_FILE_SIZE, load_data_rows, load_ontology, load_project_context};
