//! Data model for annotation import validation.
//!
//! - **Kinds** (`kind`): the closed set of tool and classification kinds
//! - **Records** (`record`): typed annotation records after resolution
//! - **Errors** (`error`): the validation error taxonomy
//! - **Options** (`options`): batch validation configuration
//! - **Raw records** (`raw`): untyped input lines with their line index

pub mod error;
pub mod ids;
pub mod kind;
pub mod options;
pub mod raw;
pub mod record;

pub use error::{Category, ErrorKind, LineError, ValidationError};
pub use ids::{NESTED_DATA_ROW_ID, PLATFORM_ID_LEN, is_platform_id};
pub use kind::ToolKind;
pub use options::{FailureMode, ValidationOptions};
pub use raw::RawRecord;
pub use record::{Annotation, BoundingBox, FrameRange, MaskRef, Payload, Point, Scope, TextLocation};

/// Result type for record validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
