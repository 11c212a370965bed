//! Serde types for a project's normalized ontology.
//!
//! Required fields are optional here so that a missing id or kind is reported
//! as a malformed ontology with the offending path, not as a serde error.
//! Other fields (colors, ontology metadata) are accepted and ignored.

use serde::{Deserialize, Serialize};

/// Normalized ontology: tools plus top-level classifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OntologySnapshot {
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
    #[serde(default)]
    pub classifications: Vec<ClassificationEntry>,
}

/// A tool node (polygon, rectangle, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEntry {
    pub feature_schema_id: Option<String>,
    pub tool: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub classifications: Vec<ClassificationEntry>,
}

/// A classification node (text, radio, checklist, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationEntry {
    pub feature_schema_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// A selectable option of a choice classification.
///
/// Options may declare follow-up classifications of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    pub feature_schema_id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub options: Vec<ClassificationEntry>,
}
