//! TOML configuration for the `validate` command.
//!
//! ```toml
//! [validation]
//! failure_mode = "collect-all"
//! threads = 4
//! strict_ids = true
//! max_errors = 500
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use aiv_model::{FailureMode, ValidationOptions};

use crate::cli::ValidateArgs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub validation: ValidationOptions,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.validation.max_errors == Some(0) {
            bail!("validation.max_errors must be at least 1");
        }
        Ok(config)
    }
}

/// Merge command-line flags over the file configuration.
///
/// Flags only ever tighten or set values; an absent flag keeps the file value.
pub fn resolve_options(args: &ValidateArgs, file: Option<FileConfig>) -> ValidationOptions {
    let mut options = file.map(|config| config.validation).unwrap_or_default();
    if args.collect_all {
        options.failure_mode = FailureMode::CollectAll;
    }
    if args.threads.is_some() {
        options.threads = args.threads;
    }
    if args.strict_ids {
        options.strict_ids = true;
    }
    if args.max_errors.is_some() {
        options.max_errors = args.max_errors;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_validation_table() {
        let config = FileConfig::parse(
            "[validation]\nfailure_mode = \"collect-all\"\nthreads = 4\nmax_errors = 10\n",
        )
        .unwrap();
        assert_eq!(config.validation.failure_mode, FailureMode::CollectAll);
        assert_eq!(config.validation.threads, Some(4));
        assert!(!config.validation.strict_ids);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn zero_max_errors_is_rejected() {
        let error = FileConfig::parse("[validation]\nmax_errors = 0\n").unwrap_err();
        assert!(error.to_string().contains("max_errors"));
    }

    #[test]
    fn unknown_table_is_rejected() {
        assert!(FileConfig::parse("[output]\ndir = \"x\"\n").is_err());
    }
}
