//! Validation error taxonomy.
//!
//! Each [`ValidationError`] variant carries only the data needed to explain
//! it. [`ErrorKind`] is the programmatic discriminant callers match on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kind::ToolKind;

/// A validation failure for a single record (or for the ontology itself).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    // =========================================================================
    // ONTOLOGY
    // =========================================================================
    /// The ontology snapshot is missing required fields or is cyclic.
    #[error("malformed ontology: {message}")]
    MalformedOntology { message: String },

    // =========================================================================
    // STRUCTURE
    // =========================================================================
    /// No variant (or more than one) fully matches the record's fields.
    #[error(
        "fields [{}] do not select exactly one variant; expected the determinant fields of one of: {}",
        .present.join(", "),
        describe_candidates(.candidates)
    )]
    AmbiguousOrUnknownVariant {
        /// Top-level fields found on the record.
        present: Vec<String>,
        /// Variants that fully matched with the best score (ties).
        matched: Vec<ToolKind>,
        /// Every variant considered.
        candidates: Vec<ToolKind>,
    },

    /// `answer` is neither a string (Text) nor an object (Radio).
    #[error("unexpected type for {field}: found {found}, expected a string (Text) or an object (Radio)")]
    AnswerTypeMismatch { field: String, found: &'static str },

    /// Fields not declared by the resolved variant.
    #[error("{} does not accept field(s): {}", .kind.label(), .fields.join(", "))]
    ExtraFieldsForbidden { kind: ToolKind, fields: Vec<String> },

    /// A declared field is missing, has the wrong JSON shape, or breaks a
    /// scalar constraint.
    #[error("invalid {field}: expected {expected}, found {found}")]
    InvalidField {
        field: String,
        expected: String,
        found: String,
    },

    /// The line is valid JSON but not an object.
    #[error("record must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    // =========================================================================
    // GEOMETRY
    // =========================================================================
    /// Too few points for the shape.
    #[error("a {} needs at least {min_points} points in {field}, found {found}", .kind.label())]
    InvalidGeometry {
        kind: ToolKind,
        field: String,
        min_points: usize,
        found: usize,
    },

    /// Text location is not a non-empty, non-negative range.
    #[error("{field} must satisfy 0 <= start < end, found start={start}, end={end}")]
    InvalidRange { field: String, start: i64, end: i64 },

    /// Mask color is not an RGB triple in [0, 255].
    #[error("{field} must be three channels in [0, 255], found {found}")]
    InvalidColor { field: String, found: String },

    /// The same option was selected twice in one checklist.
    #[error("{field} selects option {option} more than once")]
    DuplicateAnswer { field: String, option: String },

    // =========================================================================
    // CROSS REFERENCE
    // =========================================================================
    /// Data row is not part of the project's datasets.
    #[error("data row {data_row_id} is not attached to the project")]
    UnknownDataRow { data_row_id: String },

    /// Feature schema is not in the project's ontology.
    #[error("schema id {schema_id} is not valid for the project's ontology")]
    UnknownFeatureSchema { schema_id: String },

    /// Feature schema exists but declares a different tool kind.
    #[error(
        "schema id {schema_id} in {field} maps to tool {expected}, but the record is a {}",
        .found.label()
    )]
    SchemaKindMismatch {
        field: String,
        schema_id: String,
        expected: ToolKind,
        found: ToolKind,
    },

    /// Selected option is not declared by the feature schema.
    #[error(
        "option {option} in {field} is not an option of {schema_id}; expected one of [{}]",
        .allowed.join(", ")
    )]
    InvalidOption {
        field: String,
        schema_id: String,
        option: String,
        allowed: Vec<String>,
    },

    /// Nested classification schema is not a child of its parent's schema.
    #[error(
        "{field} references {schema_id}, which is not a classification of {parent}; expected one of [{}]",
        .allowed.join(", ")
    )]
    UnknownChildSchema {
        field: String,
        parent: String,
        schema_id: String,
        allowed: Vec<String>,
    },

    // =========================================================================
    // UNIQUENESS
    // =========================================================================
    /// UUID already used earlier in the batch.
    #[error("uuid {uuid} already used on line {}; uuids must be unique in an import", .first_line + 1)]
    DuplicateUuid { uuid: String, first_line: usize },
}

fn describe_candidates(candidates: &[ToolKind]) -> String {
    candidates
        .iter()
        .map(|kind| format!("{} [{}]", kind.label(), kind.determinants().join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Programmatic discriminant of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MalformedOntology,
    AmbiguousOrUnknownVariant,
    AnswerTypeMismatch,
    ExtraFieldsForbidden,
    InvalidField,
    NotAnObject,
    InvalidGeometry,
    InvalidRange,
    InvalidColor,
    DuplicateAnswer,
    UnknownDataRow,
    UnknownFeatureSchema,
    SchemaKindMismatch,
    InvalidOption,
    UnknownChildSchema,
    DuplicateUuid,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedOntology => "MalformedOntology",
            Self::AmbiguousOrUnknownVariant => "AmbiguousOrUnknownVariant",
            Self::AnswerTypeMismatch => "AnswerTypeMismatch",
            Self::ExtraFieldsForbidden => "ExtraFieldsForbidden",
            Self::InvalidField => "InvalidField",
            Self::NotAnObject => "NotAnObject",
            Self::InvalidGeometry => "InvalidGeometry",
            Self::InvalidRange => "InvalidRange",
            Self::InvalidColor => "InvalidColor",
            Self::DuplicateAnswer => "DuplicateAnswer",
            Self::UnknownDataRow => "UnknownDataRow",
            Self::UnknownFeatureSchema => "UnknownFeatureSchema",
            Self::SchemaKindMismatch => "SchemaKindMismatch",
            Self::InvalidOption => "InvalidOption",
            Self::UnknownChildSchema => "UnknownChildSchema",
            Self::DuplicateUuid => "DuplicateUuid",
        }
    }

    /// Validation stage the kind belongs to.
    pub fn category(&self) -> Category {
        match self {
            Self::MalformedOntology => Category::Ontology,
            Self::AmbiguousOrUnknownVariant
            | Self::AnswerTypeMismatch
            | Self::ExtraFieldsForbidden
            | Self::InvalidField
            | Self::NotAnObject => Category::Structure,
            Self::InvalidGeometry | Self::InvalidRange | Self::InvalidColor => Category::Geometry,
            Self::DuplicateAnswer => Category::Consistency,
            Self::UnknownDataRow
            | Self::UnknownFeatureSchema
            | Self::SchemaKindMismatch
            | Self::InvalidOption
            | Self::UnknownChildSchema => Category::CrossReference,
            Self::DuplicateUuid => Category::Uniqueness,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation stage categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Ontology,
    Structure,
    Geometry,
    Consistency,
    CrossReference,
    Uniqueness,
}

impl Category {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ontology => "Ontology",
            Self::Structure => "Structure",
            Self::Geometry => "Geometry",
            Self::Consistency => "Consistency",
            Self::CrossReference => "Cross Reference",
            Self::Uniqueness => "Uniqueness",
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedOntology { .. } => ErrorKind::MalformedOntology,
            Self::AmbiguousOrUnknownVariant { .. } => ErrorKind::AmbiguousOrUnknownVariant,
            Self::AnswerTypeMismatch { .. } => ErrorKind::AnswerTypeMismatch,
            Self::ExtraFieldsForbidden { .. } => ErrorKind::ExtraFieldsForbidden,
            Self::InvalidField { .. } => ErrorKind::InvalidField,
            Self::NotAnObject { .. } => ErrorKind::NotAnObject,
            Self::InvalidGeometry { .. } => ErrorKind::InvalidGeometry,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::InvalidColor { .. } => ErrorKind::InvalidColor,
            Self::DuplicateAnswer { .. } => ErrorKind::DuplicateAnswer,
            Self::UnknownDataRow { .. } => ErrorKind::UnknownDataRow,
            Self::UnknownFeatureSchema { .. } => ErrorKind::UnknownFeatureSchema,
            Self::SchemaKindMismatch { .. } => ErrorKind::SchemaKindMismatch,
            Self::InvalidOption { .. } => ErrorKind::InvalidOption,
            Self::UnknownChildSchema { .. } => ErrorKind::UnknownChildSchema,
            Self::DuplicateUuid { .. } => ErrorKind::DuplicateUuid,
        }
    }

    pub fn category(&self) -> Category {
        self.kind().category()
    }

    /// Offending field path, when the error points at one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedOntology { .. }
            | Self::AmbiguousOrUnknownVariant { .. }
            | Self::ExtraFieldsForbidden { .. }
            | Self::NotAnObject { .. } => None,
            Self::AnswerTypeMismatch { field, .. }
            | Self::InvalidField { field, .. }
            | Self::InvalidGeometry { field, .. }
            | Self::InvalidRange { field, .. }
            | Self::InvalidColor { field, .. }
            | Self::DuplicateAnswer { field, .. }
            | Self::SchemaKindMismatch { field, .. }
            | Self::InvalidOption { field, .. }
            | Self::UnknownChildSchema { field, .. } => Some(field),
            Self::UnknownDataRow { .. } => Some("dataRow.id"),
            Self::UnknownFeatureSchema { .. } => Some("schemaId"),
            Self::DuplicateUuid { .. } => Some("uuid"),
        }
    }

    pub fn malformed_ontology(message: impl Into<String>) -> Self {
        Self::MalformedOntology {
            message: message.into(),
        }
    }

    /// Create an invalid-field error with expected/found context.
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// A user-facing hint for fixing the record.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MalformedOntology { .. } => {
                Some("Re-export the ontology snapshot; every node needs a featureSchemaId and a kind.")
            }
            Self::AmbiguousOrUnknownVariant { matched, .. } if matched.len() > 1 => {
                Some("Send the determinant field of exactly one annotation type per line.")
            }
            Self::AmbiguousOrUnknownVariant { .. } => {
                Some("Add the determinant field of the intended annotation type.")
            }
            Self::AnswerTypeMismatch { .. } => {
                Some("Use a string answer for text or {\"schemaId\": ...} for radio.")
            }
            Self::ExtraFieldsForbidden { .. } => {
                Some("Remove fields the annotation type does not declare.")
            }
            Self::UnknownDataRow { .. } => {
                Some("Check that the data row belongs to a dataset attached to the project.")
            }
            Self::UnknownFeatureSchema { .. } => {
                Some("Use a featureSchemaId from the project's current ontology.")
            }
            Self::SchemaKindMismatch { .. } => {
                Some("Point the record at a feature schema of the same tool kind.")
            }
            Self::InvalidOption { .. } => {
                Some("Select one of the options declared for the classification.")
            }
            Self::UnknownChildSchema { .. } => {
                Some("Nested classifications must be declared under the parent tool in the ontology.")
            }
            Self::DuplicateUuid { .. } => Some("Give every annotation in the import its own uuid."),
            Self::DuplicateAnswer { .. } => Some("List each checklist option at most once."),
            _ => None,
        }
    }
}

/// A validation error attributed to an input line.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {}: {error}", .line + 1)]
pub struct LineError {
    /// Zero-based line index in the input.
    pub line: usize,
    #[source]
    pub error: ValidationError,
}

impl LineError {
    pub fn new(line: usize, error: ValidationError) -> Self {
        Self { line, error }
    }

    /// One-based line number for display.
    pub fn line_number(&self) -> usize {
        self.line + 1
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_category() {
        let error = ValidationError::DuplicateUuid {
            uuid: "u1".to_string(),
            first_line: 0,
        };
        assert_eq!(error.kind(), ErrorKind::DuplicateUuid);
        assert_eq!(error.category(), Category::Uniqueness);
        assert_eq!(error.field(), Some("uuid"));
    }

    #[test]
    fn messages_carry_expected_and_actual() {
        let error = ValidationError::InvalidOption {
            field: "answer.schemaId".to_string(),
            schema_id: "R1".to_string(),
            option: "opt_c".to_string(),
            allowed: vec!["opt_a".to_string(), "opt_b".to_string()],
        };
        let message = error.to_string();
        assert!(message.contains("opt_c"));
        assert!(message.contains("opt_a, opt_b"));
    }

    #[test]
    fn line_error_displays_one_based() {
        let error = LineError::new(
            2,
            ValidationError::UnknownDataRow {
                data_row_id: "d9".to_string(),
            },
        );
        assert_eq!(error.line_number(), 3);
        assert!(error.to_string().starts_with("line 3:"));
    }
}
