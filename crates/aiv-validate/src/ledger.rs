//! Batch-wide uuid accumulator.

use std::collections::HashMap;

use aiv_model::{Result, ValidationError};

/// Records the first line each uuid appeared on.
///
/// Must be fed in input order so the second occurrence is the one reported.
#[derive(Debug, Clone, Default)]
pub struct UuidLedger {
    seen: HashMap<String, usize>,
}

impl UuidLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `uuid` at `line`; fails if it was already seen.
    pub fn record(&mut self, uuid: &str, line: usize) -> Result<()> {
        if let Some(&first_line) = self.seen.get(uuid) {
            return Err(ValidationError::DuplicateUuid {
                uuid: uuid.to_string(),
                first_line,
            });
        }
        self.seen.insert(uuid.to_string(), line);
        Ok(())
    }

    pub fn first_line(&self, uuid: &str) -> Option<usize> {
        self.seen.get(uuid).copied()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_occurrence_points_at_first() {
        let mut ledger = UuidLedger::new();
        ledger.record("u1", 0).unwrap();
        ledger.record("u2", 1).unwrap();
        assert!(ledger.record("u1", 4).is_err());
        let error = ledger.record("u1", 7).unwrap_err();
        assert_eq!(
            error,
            ValidationError::DuplicateUuid {
                uuid: "u1".to_string(),
                first_line: 0
            }
        );
        assert_eq!(ledger.len(), 2);
    }
}
