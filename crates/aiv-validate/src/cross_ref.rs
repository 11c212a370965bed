//! Cross-reference checks against the project context.

use aiv_model::{Annotation, Payload, Result, ValidationError};
use aiv_ontology::{FeatureSchema, ProjectContext};

use crate::fields::{child_path, index_path};

/// Check data-row existence, then the record's schema tree.
///
/// Order: data row, feature schema, tool kind, options, nested children.
pub fn check_references(annotation: &Annotation, context: &ProjectContext) -> Result<()> {
    if !context.data_rows.contains(&annotation.data_row_id) {
        return Err(ValidationError::UnknownDataRow {
            data_row_id: annotation.data_row_id.clone(),
        });
    }
    let schema = context.schemas.lookup(&annotation.schema_id).ok_or_else(|| {
        ValidationError::UnknownFeatureSchema {
            schema_id: annotation.schema_id.clone(),
        }
    })?;
    check_against(annotation, schema, "")
}

fn check_against(annotation: &Annotation, schema: &FeatureSchema, prefix: &str) -> Result<()> {
    if schema.kind != annotation.kind() {
        return Err(ValidationError::SchemaKindMismatch {
            field: child_path(prefix, "schemaId"),
            schema_id: schema.id.clone(),
            expected: schema.kind,
            found: annotation.kind(),
        });
    }

    let selected: Vec<(String, &String)> = match &annotation.payload {
        Payload::Radio(option) => vec![(child_path(prefix, "answer.schemaId"), option)],
        Payload::CheckList(options) => {
            let answers = child_path(prefix, "answers");
            options
                .iter()
                .enumerate()
                .map(|(idx, option)| (child_path(&index_path(&answers, idx), "schemaId"), option))
                .collect()
        }
        _ => Vec::new(),
    };
    if let Some((field, option)) = selected
        .into_iter()
        .find(|(_, option)| !schema.has_option(option))
    {
        return Err(ValidationError::InvalidOption {
            field,
            schema_id: schema.id.clone(),
            option: option.clone(),
            allowed: schema.option_ids(),
        });
    }

    let nested_prefix = child_path(prefix, "classifications");
    for (idx, nested) in annotation.classifications.iter().enumerate() {
        let path = index_path(&nested_prefix, idx);
        let child = schema.child(&nested.schema_id).ok_or_else(|| {
            ValidationError::UnknownChildSchema {
                field: child_path(&path, "schemaId"),
                parent: schema.id.clone(),
                schema_id: nested.schema_id.clone(),
                allowed: schema.child_ids(),
            }
        })?;
        check_against(nested, child, &path)?;
    }
    Ok(())
}
