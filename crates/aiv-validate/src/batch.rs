//! Batch validation over a stream of raw records.
//!
//! Each record runs resolution, field checks and cross-reference checks.
//! The uuid ledger is always applied on the calling thread in input order,
//! so parallel runs report exactly what a sequential run would.

use std::time::Instant;

use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use aiv_model::{Annotation, LineError, RawRecord, Result, ValidationOptions};
use aiv_ontology::ProjectContext;

use crate::checks::check_fields;
use crate::cross_ref::check_references;
use crate::emit::ValidatedRecord;
use crate::ledger::UuidLedger;
use crate::resolve::resolve;

/// Records handed to the pool per worker thread in one round.
const RECORDS_PER_WORKER: usize = 64;

/// Validate a single record against the project context.
///
/// Runs resolution, then field checks, then cross-reference checks, and
/// returns the first failure. Does not check uuid uniqueness.
pub fn validate_record(
    value: &Value,
    context: &ProjectContext,
    options: &ValidationOptions,
) -> Result<Annotation> {
    let annotation = resolve(value, options)?;
    check_fields(&annotation)?;
    check_references(&annotation, context)?;
    Ok(annotation)
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Records supplied.
    pub total: usize,
    /// Records validated before the run finished or stopped.
    pub processed: usize,
    /// Records that passed every check, in input order.
    pub valid: Vec<ValidatedRecord>,
    /// Errors in input order.
    pub errors: Vec<LineError>,
    /// True when the run stopped before the last record.
    pub aborted: bool,
}

impl BatchOutcome {
    /// Every record was processed and none failed.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && !self.aborted
    }

    pub fn into_result(self) -> std::result::Result<Vec<ValidatedRecord>, Vec<LineError>> {
        if self.is_success() {
            Ok(self.valid)
        } else {
            Err(self.errors)
        }
    }
}

/// Validates batches against one project context.
#[derive(Debug, Clone)]
pub struct BatchValidator<'a> {
    context: &'a ProjectContext,
    options: ValidationOptions,
}

impl<'a> BatchValidator<'a> {
    pub fn new(context: &'a ProjectContext, options: ValidationOptions) -> Self {
        Self { context, options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn validate<I>(&self, records: I) -> BatchOutcome
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let records: Vec<RawRecord> = records.into_iter().collect();
        let batch_span = info_span!(
            "batch",
            records = records.len(),
            failure_mode = ?self.options.failure_mode,
            threads = ?self.options.threads
        );
        let _batch_guard = batch_span.enter();
        let start = Instant::now();

        let mut run = Run::new(&self.options, records.len());
        match self.options.threads.filter(|n| *n > 1) {
            Some(threads) => match build_thread_pool(threads) {
                Ok(pool) => self.validate_parallel(&pool, threads, &records, &mut run),
                Err(error) => {
                    warn!(%error, "falling back to sequential validation");
                    self.validate_sequential(&records, &mut run);
                }
            },
            None => self.validate_sequential(&records, &mut run),
        }

        let outcome = run.finish();
        info!(
            processed = outcome.processed,
            valid = outcome.valid.len(),
            errors = outcome.errors.len(),
            aborted = outcome.aborted,
            duration_ms = start.elapsed().as_millis(),
            "batch validation complete"
        );
        outcome
    }

    fn validate_sequential(&self, records: &[RawRecord], run: &mut Run<'_>) {
        for record in records {
            let verdict = validate_record(&record.value, self.context, &self.options);
            if !run.apply(record, verdict) {
                break;
            }
        }
    }

    fn validate_parallel(
        &self,
        pool: &rayon::ThreadPool,
        threads: usize,
        records: &[RawRecord],
        run: &mut Run<'_>,
    ) {
        for chunk in records.chunks(threads * RECORDS_PER_WORKER) {
            let verdicts: Vec<Result<Annotation>> = pool.install(|| {
                chunk
                    .par_iter()
                    .map(|record| validate_record(&record.value, self.context, &self.options))
                    .collect()
            });
            for (record, verdict) in chunk.iter().zip(verdicts) {
                if !run.apply(record, verdict) {
                    return;
                }
            }
        }
    }
}

/// Convenience entry point: `Ok(())` or every line-indexed error.
pub fn validate_batch<I>(
    records: I,
    context: &ProjectContext,
    options: ValidationOptions,
) -> std::result::Result<(), Vec<LineError>>
where
    I: IntoIterator<Item = RawRecord>,
{
    BatchValidator::new(context, options)
        .validate(records)
        .into_result()
        .map(|_| ())
}

fn build_thread_pool(threads: usize) -> anyhow::Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}"))
}

/// Mutable state of one batch run.
struct Run<'o> {
    options: &'o ValidationOptions,
    ledger: UuidLedger,
    outcome: BatchOutcome,
}

impl<'o> Run<'o> {
    fn new(options: &'o ValidationOptions, total: usize) -> Self {
        Self {
            options,
            ledger: UuidLedger::new(),
            outcome: BatchOutcome {
                total,
                ..BatchOutcome::default()
            },
        }
    }

    /// Fold one verdict into the outcome. Returns false when the run must stop.
    fn apply(&mut self, record: &RawRecord, verdict: Result<Annotation>) -> bool {
        self.outcome.processed += 1;
        let line = record.line;

        let annotation = match verdict {
            Ok(annotation) => {
                debug!(
                    line,
                    kind = %annotation.kind(),
                    schema_id = %annotation.schema_id,
                    "record valid"
                );
                Some(annotation)
            }
            Err(error) => {
                debug!(line, kind = %error.kind(), "record invalid");
                self.outcome.errors.push(LineError::new(line, error));
                None
            }
        };
        if self.should_stop() {
            return false;
        }

        let duplicate = record
            .uuid()
            .and_then(|uuid| self.ledger.record(uuid, line).err());
        if let Some(error) = duplicate {
            debug!(line, kind = %error.kind(), "duplicate uuid");
            self.outcome.errors.push(LineError::new(line, error));
        } else if let (Some(annotation), Value::Object(raw)) = (annotation, &record.value) {
            self.outcome
                .valid
                .push(ValidatedRecord::new(line, annotation, raw.clone()));
        }
        !self.should_stop()
    }

    fn should_stop(&self) -> bool {
        let errors = self.outcome.errors.len();
        if self.options.is_fail_fast() {
            errors > 0
        } else {
            self.options.error_cap().is_some_and(|max| errors >= max)
        }
    }

    fn finish(mut self) -> BatchOutcome {
        if let Some(max) = self.options.error_cap() {
            self.outcome.errors.truncate(max);
        }
        self.outcome.aborted = self.outcome.processed < self.outcome.total;
        self.outcome
    }
}
