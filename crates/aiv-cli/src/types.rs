use std::path::PathBuf;

use aiv_model::ValidationOptions;
use aiv_validate::BatchReport;

#[derive(Debug)]
pub struct ValidateResult {
    pub input: PathBuf,
    pub options: ValidationOptions,
    pub report: BatchReport,
    /// Validated records written here (successful batches only).
    pub output: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

impl ValidateResult {
    pub fn has_errors(&self) -> bool {
        !self.report.is_success()
    }
}
