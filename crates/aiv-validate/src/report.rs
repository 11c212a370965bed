//! Batch report and its JSON rendering.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use aiv_model::{Category, ErrorKind, LineError};

use crate::batch::BatchOutcome;

const REPORT_SCHEMA: &str = "aiv.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// File name written by [`write_report_json`].
pub const REPORT_FILE_NAME: &str = "validation_report.json";

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub records: usize,
    pub processed: usize,
    pub valid: usize,
    pub aborted: bool,
    pub errors: Vec<LineError>,
}

impl BatchReport {
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            records: outcome.total,
            processed: outcome.processed,
            valid: outcome.valid.len(),
            aborted: outcome.aborted,
            errors: outcome.errors.clone(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && !self.aborted
    }

    /// Lines with at least one error.
    pub fn invalid_lines(&self) -> usize {
        let mut lines: Vec<usize> = self.errors.iter().map(|e| e.line).collect();
        lines.dedup();
        lines.len()
    }

    pub fn counts_by_kind(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.errors {
            *counts.entry(error.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn counts_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.errors {
            *counts.entry(error.error.category()).or_insert(0) += 1;
        }
        counts
    }
}

#[derive(Debug, Serialize)]
pub struct ReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub batch: String,
    pub totals: ReportTotals,
    pub counts: BTreeMap<String, usize>,
    pub errors: Vec<ReportErrorJson>,
}

#[derive(Debug, Serialize)]
pub struct ReportTotals {
    pub records: usize,
    pub processed: usize,
    pub valid: usize,
    pub invalid_lines: usize,
    pub errors: usize,
    pub aborted: bool,
}

#[derive(Debug, Serialize)]
pub struct ReportErrorJson {
    /// One-based line number.
    pub line: usize,
    pub kind: ErrorKind,
    pub category: &'static str,
    pub field: Option<String>,
    pub message: String,
    pub suggestion: Option<&'static str>,
}

impl ReportPayload {
    pub fn new(batch: &str, report: &BatchReport, generated_at: String) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at,
            batch: batch.to_string(),
            totals: ReportTotals {
                records: report.records,
                processed: report.processed,
                valid: report.valid,
                invalid_lines: report.invalid_lines(),
                errors: report.errors.len(),
                aborted: report.aborted,
            },
            counts: report
                .counts_by_kind()
                .into_iter()
                .map(|(kind, count)| (kind.as_str().to_string(), count))
                .collect(),
            errors: report
                .errors
                .iter()
                .map(|error| ReportErrorJson {
                    line: error.line_number(),
                    kind: error.kind(),
                    category: error.error.category().label(),
                    field: error.error.field().map(str::to_string),
                    message: error.error.to_string(),
                    suggestion: error.error.suggestion(),
                })
                .collect(),
        }
    }
}

/// Write `validation_report.json` into `output_dir`.
pub fn write_report_json(output_dir: &Path, batch: &str, report: &BatchReport) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(REPORT_FILE_NAME);
    let payload = ReportPayload::new(batch, report, Utc::now().to_rfc3339());
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
