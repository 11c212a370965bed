//! Integration tests for the validate command.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use aiv_cli::cli::ValidateArgs;
use aiv_cli::commands::run_validate;
use aiv_cli::summary::totals_table;
use aiv_model::{ErrorKind, FailureMode, NESTED_DATA_ROW_ID};

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new(records: &[Value]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let ontology = json!({
            "normalized": {
                "tools": [{
                    "featureSchemaId": "P1",
                    "tool": "polygon",
                    "classifications": [{"featureSchemaId": "N1", "type": "text"}]
                }],
                "classifications": [{
                    "featureSchemaId": "R1",
                    "type": "radio",
                    "options": [{"featureSchemaId": "opt_a"}, {"featureSchemaId": "opt_b"}]
                }]
            }
        });
        fs::write(dir.path().join("ontology.json"), ontology.to_string()).unwrap();
        fs::write(dir.path().join("rows.txt"), "d1\nd2\n").unwrap();
        let lines: Vec<String> = records.iter().map(Value::to_string).collect();
        fs::write(dir.path().join("batch.ndjson"), lines.join("\n") + "\n").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn args(&self) -> ValidateArgs {
        ValidateArgs {
            records: self.path("batch.ndjson"),
            ontology: self.path("ontology.json"),
            data_rows: self.path("rows.txt"),
            collect_all: false,
            threads: None,
            strict_ids: false,
            max_errors: None,
            output: None,
            report_dir: None,
            config: None,
        }
    }
}

fn radio(uuid: &str, option: &str) -> Value {
    json!({"uuid": uuid, "schemaId": "R1", "dataRow": {"id": "d1"}, "answer": {"schemaId": option}})
}

fn polygon_with_note(uuid: &str) -> Value {
    json!({
        "uuid": uuid,
        "schemaId": "P1",
        "dataRow": {"id": "d2"},
        "polygon": [{"x": 0, "y": 0}, {"x": 4, "y": 0}, {"x": 4, "y": 3}],
        "classifications": [{"schemaId": "N1", "answer": "parked"}]
    })
}

fn read_lines(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn valid_batch_is_written_with_placeholders() {
    let fixture = Fixture::new(&[radio("u1", "opt_a"), polygon_with_note("u2")]);
    let mut args = fixture.args();
    args.output = Some(fixture.path("out/valid.ndjson"));

    let result = run_validate(&args).unwrap();
    assert!(!result.has_errors());
    assert_eq!(result.report.valid, 2);

    let written = read_lines(&fixture.path("out/valid.ndjson"));
    assert_eq!(written.len(), 2);
    assert_eq!(written[0], radio("u1", "opt_a"));
    let nested = &written[1]["classifications"][0];
    assert_eq!(nested["dataRow"]["id"], json!(NESTED_DATA_ROW_ID));
    assert!(nested["uuid"].is_string());
}

#[test]
fn invalid_batch_writes_report_but_no_output() {
    let fixture = Fixture::new(&[radio("u1", "opt_c"), radio("u1", "opt_a")]);
    let mut args = fixture.args();
    args.collect_all = true;
    args.output = Some(fixture.path("valid.ndjson"));
    args.report_dir = Some(fixture.path("reports"));

    let result = run_validate(&args).unwrap();
    assert!(result.has_errors());
    let kinds: Vec<ErrorKind> = result.report.errors.iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![ErrorKind::InvalidOption, ErrorKind::DuplicateUuid]);
    assert!(result.output.is_none());
    assert!(!fixture.path("valid.ndjson").exists());

    let report_path = result.report_path.expect("report written");
    let report: Value = serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(report["batch"], json!("batch"));
    assert_eq!(report["totals"]["errors"], json!(2));

    let table = totals_table(&result.report).to_string();
    assert!(table.contains("Cross Reference"));
    assert!(table.contains("Uniqueness"));
}

#[test]
fn config_file_sets_defaults_and_flags_override() {
    let fixture = Fixture::new(&[radio("u1", "opt_c"), radio("u2", "opt_c"), radio("u3", "opt_c")]);
    fs::write(
        fixture.path("aiv.toml"),
        "[validation]\nfailure_mode = \"collect-all\"\nmax_errors = 1\n",
    )
    .unwrap();
    let mut args = fixture.args();
    args.config = Some(fixture.path("aiv.toml"));

    let result = run_validate(&args).unwrap();
    assert_eq!(result.options.failure_mode, FailureMode::CollectAll);
    assert_eq!(result.report.errors.len(), 1);
    assert!(result.report.aborted);

    args.max_errors = Some(5);
    let result = run_validate(&args).unwrap();
    assert_eq!(result.report.errors.len(), 3);
    assert!(!result.report.aborted);
}

#[test]
fn unreadable_records_fail_with_context() {
    let fixture = Fixture::new(&[radio("u1", "opt_a")]);
    fs::write(fixture.path("batch.ndjson"), "{\"uuid\": \"u1\"\n").unwrap();
    let error = run_validate(&fixture.args()).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("read records"));
    assert!(message.contains("line 1: invalid JSON"));
}
