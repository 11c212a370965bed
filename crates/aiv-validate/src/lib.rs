//! Annotation record validation.
//!
//! A batch runs every record through three stages, in order:
//!
//! 1. **Resolution** (`resolve`): pick the annotation variant from the
//!    record's determinant fields and parse it strictly
//! 2. **Field checks** (`checks`): geometry, ranges, colors and checklist
//!    answers
//! 3. **Cross references** (`cross_ref`): data rows, feature schemas, options
//!    and nested classifications against the project context
//!
//! [`BatchValidator`] adds batch-wide uuid uniqueness on top and supports
//! fail-fast and collect-all modes.

mod batch;
pub mod checks;
pub mod cross_ref;
mod emit;
mod fields;
mod ledger;
mod report;
pub mod resolve;

pub use batch::{BatchOutcome, BatchValidator, validate_batch, validate_record};
pub use emit::ValidatedRecord;
pub use ledger::UuidLedger;
pub use report::{
    BatchReport, REPORT_FILE_NAME, ReportErrorJson, ReportPayload, ReportTotals, write_report_json,
};
pub use resolve::{NESTED_SHAPES, TOP_LEVEL_SHAPES, resolve, select_variant};
