use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use serde_json::Value;
use tracing::{debug, info, info_span, trace};

use aiv_ingest::{load_ontology, load_project_context, read_ndjson_file, write_ndjson_file};
use aiv_model::{LineError, RawRecord, Scope, ToolKind};
use aiv_validate::{BatchReport, BatchValidator, resolve::allowed_fields, write_report_json};

use crate::cli::{OntologyArgs, ValidateArgs};
use crate::config::{FileConfig, resolve_options};
use crate::logging::redact_value;
use crate::summary::apply_table_style;
use crate::types::ValidateResult;

pub fn run_kinds() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Tool", "Determinants", "Other fields"]);
    apply_table_style(&mut table);
    for row in kind_rows() {
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

/// One row per annotation type: label, tool kind, determinants, other fields.
pub fn kind_rows() -> Vec<Vec<String>> {
    ToolKind::all()
        .iter()
        .map(|kind| {
            let determinants = kind.determinants();
            let others: Vec<&str> = allowed_fields(*kind, Scope::TopLevel)
                .into_iter()
                .filter(|field| !determinants.contains(field))
                .collect();
            vec![
                kind.label().to_string(),
                kind.as_str().to_string(),
                determinants.join(", "),
                others.join(", "),
            ]
        })
        .collect()
}

pub fn run_ontology(args: &OntologyArgs) -> Result<()> {
    let index = load_ontology(&args.ontology)
        .with_context(|| format!("load ontology {}", args.ontology.display()))?;
    let mut table = Table::new();
    table.set_header(vec!["Feature schema", "Kind", "Name", "Options", "Children"]);
    apply_table_style(&mut table);
    for schema in index.iter() {
        table.add_row(vec![
            schema.id.clone(),
            schema.kind.to_string(),
            schema.name.clone().unwrap_or_else(|| "-".to_string()),
            schema.options.len().to_string(),
            schema.children.len().to_string(),
        ]);
    }
    println!("{table}");
    if !index.skipped().is_empty() {
        println!("Skipped (unsupported kinds):");
        for entry in index.skipped() {
            println!("- {} {} ({})", entry.path, entry.feature_schema_id, entry.kind);
        }
    }
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let input_name = batch_name(&args.records);
    let span = info_span!("validate", batch = %input_name);
    let _guard = span.enter();
    let start = Instant::now();

    let file_config = args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let options = resolve_options(args, file_config);
    debug!(?options, "validation options");

    let context = load_project_context(&args.ontology, &args.data_rows).context("load project")?;
    let records = read_ndjson_file(&args.records)
        .with_context(|| format!("read records {}", args.records.display()))?;
    info!(records = records.len(), "records loaded");

    let outcome = BatchValidator::new(&context, options.clone()).validate(records.iter().cloned());
    log_rejected(&records, &outcome.errors);
    let report = BatchReport::from_outcome(&outcome);

    let report_path = match &args.report_dir {
        Some(dir) => Some(write_report_json(dir, &input_name, &report).context("write report")?),
        None => None,
    };

    let output = match (&args.output, outcome.into_result()) {
        (Some(path), Ok(valid)) => {
            let values: Vec<Value> = valid.iter().map(|record| record.to_json()).collect();
            write_ndjson_file(path, &values)
                .with_context(|| format!("write {}", path.display()))?;
            Some(path.clone())
        }
        _ => None,
    };

    info!(
        errors = report.errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "validation finished"
    );
    Ok(ValidateResult {
        input: args.records.clone(),
        options,
        report,
        output,
        report_path,
    })
}

fn log_rejected(records: &[RawRecord], errors: &[LineError]) {
    for error in errors {
        let Ok(idx) = records.binary_search_by_key(&error.line, |record| record.line) else {
            continue;
        };
        let record = &records[idx];
        let text = record.value.to_string();
        trace!(
            line = error.line_number(),
            kind = %error.kind(),
            record = redact_value(&text),
            "rejected record"
        );
    }
}

fn batch_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("batch")
        .to_string()
}
