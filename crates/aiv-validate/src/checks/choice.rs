//! Checklist answer consistency.

use std::collections::HashSet;

use aiv_model::{Result, ValidationError};

use crate::fields::{child_path, index_path};

/// Reject an option id selected twice within one checklist.
///
/// Duplicates across records are not checked.
pub fn check_unique_answers(answers: &[String], field: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(answers.len());
    for (idx, option) in answers.iter().enumerate() {
        if !seen.insert(option.as_str()) {
            return Err(ValidationError::DuplicateAnswer {
                field: child_path(&index_path(field, idx), "schemaId"),
                option: option.clone(),
            });
        }
    }
    Ok(())
}
