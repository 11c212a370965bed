//! Configuration options for batch validation.

use serde::{Deserialize, Serialize};

/// How the batch validator reacts to an invalid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureMode {
    /// Stop at the first invalid line.
    #[default]
    FailFast,
    /// Validate every line and report all errors.
    CollectAll,
}

/// Options controlling batch validation behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Fail-fast (default) or collect-all.
    pub failure_mode: FailureMode,

    /// Worker threads for record validation.
    ///
    /// `None` validates sequentially on the calling thread.
    pub threads: Option<usize>,

    /// Require platform-shaped ids.
    ///
    /// When set, `schemaId`, option ids and `dataRow.id` must be 25-character
    /// platform ids and `uuid` must parse as a UUID.
    pub strict_ids: bool,

    /// Stop collecting after this many errors (collect-all only).
    ///
    /// Zero is not a valid cap; [`ValidationOptions::error_cap`] treats it
    /// as unbounded and the command line rejects it.
    pub max_errors: Option<usize>,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    pub fn collect_all(self) -> Self {
        self.with_failure_mode(FailureMode::CollectAll)
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_strict_ids(mut self, enable: bool) -> Self {
        self.strict_ids = enable;
        self
    }

    pub fn with_max_errors(mut self, max_errors: Option<usize>) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn is_fail_fast(&self) -> bool {
        self.failure_mode == FailureMode::FailFast
    }

    /// Effective collect-all error cap.
    ///
    /// `None` in fail-fast mode, when unset, or when set to zero.
    pub fn error_cap(&self) -> Option<usize> {
        if self.is_fail_fast() {
            return None;
        }
        self.max_errors.filter(|max| *max > 0)
    }
}
