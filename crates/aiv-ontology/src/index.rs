//! Feature-schema index built from an ontology snapshot.
//!
//! The index is built once per validation run and never mutated. Every node
//! is checked for a feature-schema id and a kind, duplicate ids among siblings
//! are rejected, and an id that repeats one of its ancestors is treated as a
//! cycle.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, warn};

use aiv_model::{Result, ToolKind, ValidationError};

use crate::snapshot::{ClassificationEntry, OntologySnapshot, ToolEntry};

/// One node of the ontology graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSchema {
    pub id: String,
    pub kind: ToolKind,
    pub name: Option<String>,
    /// Valid option ids (choice kinds only).
    pub options: BTreeSet<String>,
    /// Child classifications keyed by feature-schema id.
    pub children: BTreeMap<String, FeatureSchema>,
}

impl FeatureSchema {
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.contains(option_id)
    }

    pub fn child(&self, schema_id: &str) -> Option<&FeatureSchema> {
        self.children.get(schema_id)
    }

    pub fn option_ids(&self) -> Vec<String> {
        self.options.iter().cloned().collect()
    }

    pub fn child_ids(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Depth of the subtree rooted here (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .values()
            .map(FeatureSchema::depth)
            .max()
            .unwrap_or(0)
    }
}

/// An ontology node left out of the index because its kind is unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub feature_schema_id: String,
    pub kind: String,
}

/// Lookup structure over the ontology's top-level feature schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaIndex {
    schemas: BTreeMap<String, FeatureSchema>,
    skipped: Vec<SkippedEntry>,
}

impl SchemaIndex {
    /// Build the index from a parsed snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedOntology`] when a node lacks its id
    /// or kind, when sibling ids collide, or when an id repeats an ancestor.
    pub fn build(snapshot: &OntologySnapshot) -> Result<Self> {
        let mut builder = IndexBuilder::default();
        for (idx, tool) in snapshot.tools.iter().enumerate() {
            builder.add_tool(&format!("tools[{idx}]"), tool)?;
        }
        for (idx, classification) in snapshot.classifications.iter().enumerate() {
            let path = format!("classifications[{idx}]");
            let mut ancestors = Vec::new();
            if let Some(schema) = builder.classification(&path, classification, &mut ancestors)? {
                builder.insert_top_level(&path, schema)?;
            }
        }
        debug!(
            schemas = builder.schemas.len(),
            skipped = builder.skipped.len(),
            "built schema index"
        );
        Ok(Self {
            schemas: builder.schemas,
            skipped: builder.skipped,
        })
    }

    /// Parse and build from a JSON value.
    ///
    /// Accepts the snapshot bare or wrapped as `{"normalized": {...}}`.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let value = match value {
            serde_json::Value::Object(mut map) if map.contains_key("normalized") => map
                .remove("normalized")
                .unwrap_or(serde_json::Value::Null),
            other => other,
        };
        let snapshot: OntologySnapshot = serde_json::from_value(value)
            .map_err(|error| ValidationError::malformed_ontology(error.to_string()))?;
        Self::build(&snapshot)
    }

    pub fn lookup(&self, schema_id: &str) -> Option<&FeatureSchema> {
        self.schemas.get(schema_id)
    }

    /// Child classifications of a top-level schema.
    pub fn children(&self, schema_id: &str) -> Option<&BTreeMap<String, FeatureSchema>> {
        self.schemas.get(schema_id).map(|schema| &schema.children)
    }

    pub fn contains(&self, schema_id: &str) -> bool {
        self.schemas.contains_key(schema_id)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterate over top-level schemas in id order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureSchema> {
        self.schemas.values()
    }

    /// Nodes ignored because their kind is not importable.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// Maximum nesting depth across the ontology.
    pub fn depth(&self) -> usize {
        self.schemas
            .values()
            .map(FeatureSchema::depth)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Default)]
struct IndexBuilder {
    schemas: BTreeMap<String, FeatureSchema>,
    skipped: Vec<SkippedEntry>,
}

impl IndexBuilder {
    fn add_tool(&mut self, path: &str, tool: &ToolEntry) -> Result<()> {
        let id = required(path, "featureSchemaId", tool.feature_schema_id.as_deref())?;
        let kind_name = required(path, "tool", tool.tool.as_deref())?;
        let kind = match ToolKind::parse(kind_name) {
            Some(kind) if !kind.is_classification() => kind,
            _ => {
                self.skip(path, id, kind_name);
                return Ok(());
            }
        };
        let mut ancestors = vec![id.to_string()];
        let children = self.children(path, &tool.classifications, &mut ancestors)?;
        let schema = FeatureSchema {
            id: id.to_string(),
            kind,
            name: tool.name.clone(),
            options: BTreeSet::new(),
            children,
        };
        self.insert_top_level(path, schema)
    }

    fn insert_top_level(&mut self, path: &str, schema: FeatureSchema) -> Result<()> {
        if self.schemas.contains_key(&schema.id) {
            return Err(ValidationError::malformed_ontology(format!(
                "{path}: duplicate featureSchemaId {}",
                schema.id
            )));
        }
        self.schemas.insert(schema.id.clone(), schema);
        Ok(())
    }

    /// Build a classification node; `None` when its kind is not importable.
    fn classification(
        &mut self,
        path: &str,
        entry: &ClassificationEntry,
        ancestors: &mut Vec<String>,
    ) -> Result<Option<FeatureSchema>> {
        let id = required(path, "featureSchemaId", entry.feature_schema_id.as_deref())?;
        let kind_name = required(path, "type", entry.kind.as_deref())?;
        let kind = match ToolKind::parse(kind_name) {
            Some(kind) if kind.is_classification() => kind,
            _ => {
                self.skip(path, id, kind_name);
                return Ok(None);
            }
        };
        if ancestors.iter().any(|ancestor| ancestor == id) {
            return Err(ValidationError::malformed_ontology(format!(
                "{path}: featureSchemaId {id} is its own ancestor (cycle through {})",
                ancestors.join(" -> ")
            )));
        }

        let mut options = BTreeSet::new();
        let mut children = BTreeMap::new();
        ancestors.push(id.to_string());
        for (idx, option) in entry.options.iter().enumerate() {
            let option_path = format!("{path}.options[{idx}]");
            let option_id = required(
                &option_path,
                "featureSchemaId",
                option.feature_schema_id.as_deref(),
            )?;
            if kind.has_options() && !options.insert(option_id.to_string()) {
                return Err(ValidationError::malformed_ontology(format!(
                    "{option_path}: duplicate option {option_id}"
                )));
            }
            let nested = self.children(&option_path, &option.options, ancestors)?;
            for (child_id, child) in nested {
                if children.insert(child_id.clone(), child).is_some() {
                    return Err(ValidationError::malformed_ontology(format!(
                        "{option_path}: duplicate featureSchemaId {child_id}"
                    )));
                }
            }
        }
        ancestors.pop();

        Ok(Some(FeatureSchema {
            id: id.to_string(),
            kind,
            name: entry.name.clone().or_else(|| entry.instructions.clone()),
            options,
            children,
        }))
    }

    fn children(
        &mut self,
        path: &str,
        entries: &[ClassificationEntry],
        ancestors: &mut Vec<String>,
    ) -> Result<BTreeMap<String, FeatureSchema>> {
        let mut children = BTreeMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let child_path = format!("{path}.classifications[{idx}]");
            let Some(child) = self.classification(&child_path, entry, ancestors)? else {
                continue;
            };
            if children.contains_key(&child.id) {
                return Err(ValidationError::malformed_ontology(format!(
                    "{child_path}: duplicate featureSchemaId {}",
                    child.id
                )));
            }
            children.insert(child.id.clone(), child);
        }
        Ok(children)
    }

    fn skip(&mut self, path: &str, id: &str, kind: &str) {
        warn!(path, feature_schema_id = id, kind, "skipping unsupported ontology kind");
        self.skipped.push(SkippedEntry {
            path: path.to_string(),
            feature_schema_id: id.to_string(),
            kind: kind.to_string(),
        });
    }
}

fn required<'a>(path: &str, field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::malformed_ontology(format!(
            "{path} is missing {field}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn index(value: serde_json::Value) -> Result<SchemaIndex> {
        SchemaIndex::from_json(value)
    }

    #[test]
    fn indexes_tools_and_classifications() {
        let index = index(json!({
            "tools": [{
                "featureSchemaId": "BOX",
                "tool": "rectangle",
                "classifications": [
                    {"featureSchemaId": "BOX_COLOR", "type": "radio",
                     "options": [{"featureSchemaId": "red"}, {"featureSchemaId": "blue"}]}
                ]
            }],
            "classifications": [{"featureSchemaId": "NOTE", "type": "text"}]
        }))
        .expect("index");

        assert_eq!(index.len(), 2);
        let tool = index.lookup("BOX").expect("tool");
        assert_eq!(tool.kind, ToolKind::Rectangle);
        let child = tool.child("BOX_COLOR").expect("child");
        assert!(child.has_option("red"));
        assert!(!child.has_option("green"));
        assert_eq!(index.children("NOTE").map(BTreeMap::len), Some(0));
        assert_eq!(index.depth(), 2);
    }

    #[test]
    fn missing_kind_is_malformed() {
        let error = index(json!({"tools": [{"featureSchemaId": "BOX"}]})).unwrap_err();
        assert_eq!(error.kind(), aiv_model::ErrorKind::MalformedOntology);
        assert!(error.to_string().contains("tools[0] is missing tool"));
    }

    #[test]
    fn option_without_id_is_malformed() {
        let error = index(json!({
            "classifications": [{"featureSchemaId": "R1", "type": "radio", "options": [{"value": "a"}]}]
        }))
        .unwrap_err();
        assert!(error.to_string().contains("classifications[0].options[0]"));
    }

    #[test]
    fn repeated_ancestor_is_a_cycle() {
        let error = index(json!({
            "tools": [{
                "featureSchemaId": "BOX",
                "tool": "rectangle",
                "classifications": [{"featureSchemaId": "BOX", "type": "text"}]
            }]
        }))
        .unwrap_err();
        assert!(error.to_string().contains("cycle"));
    }

    #[test]
    fn unsupported_kinds_are_skipped() {
        let index = index(json!({
            "tools": [{"featureSchemaId": "SEG", "tool": "raster-segmentation"}],
            "classifications": [{"featureSchemaId": "DD", "type": "dropdown"}]
        }))
        .expect("index");
        assert!(index.is_empty());
        assert_eq!(index.skipped().len(), 2);
    }

    #[test]
    fn wrapped_snapshot_is_unwrapped() {
        let index = index(json!({
            "normalized": {"classifications": [{"featureSchemaId": "NOTE", "type": "text"}]}
        }))
        .expect("index");
        assert!(index.contains("NOTE"));
    }

    #[test]
    fn duplicate_top_level_ids_are_malformed() {
        let error = index(json!({
            "tools": [{"featureSchemaId": "X", "tool": "point"}],
            "classifications": [{"featureSchemaId": "X", "type": "text"}]
        }))
        .unwrap_err();
        assert!(error.to_string().contains("duplicate featureSchemaId X"));
    }
}
