use serde_json::json;

use aiv_model::{Category, ErrorKind, RawRecord, ValidationOptions};
use aiv_ontology::{DataRowSet, ProjectContext, SchemaIndex};
use aiv_validate::{BatchReport, BatchValidator, REPORT_FILE_NAME, ReportPayload, write_report_json};

fn report() -> BatchReport {
    let schemas = SchemaIndex::from_json(json!({
        "classifications": [{
            "featureSchemaId": "R1",
            "type": "radio",
            "options": [{"featureSchemaId": "opt_a"}, {"featureSchemaId": "opt_b"}]
        }]
    }))
    .expect("index");
    let context = ProjectContext::new(schemas, ["d1"].into_iter().collect::<DataRowSet>());
    let batch = vec![
        json!({"uuid": "u1", "schemaId": "R1", "dataRow": {"id": "d1"}, "answer": {"schemaId": "opt_a"}}),
        json!({"uuid": "u1", "schemaId": "R1", "dataRow": {"id": "d1"}, "answer": {"schemaId": "opt_c"}}),
    ];
    let outcome = BatchValidator::new(&context, ValidationOptions::new().collect_all())
        .validate(RawRecord::sequence(batch));
    BatchReport::from_outcome(&outcome)
}

#[test]
fn counts_group_by_kind_and_category() {
    let report = report();
    assert!(!report.is_success());
    assert_eq!(report.invalid_lines(), 1);
    assert_eq!(report.counts_by_kind().get(&ErrorKind::InvalidOption), Some(&1));
    assert_eq!(report.counts_by_category().get(&Category::Uniqueness), Some(&1));
}

#[test]
fn report_payload_renders() {
    let payload = ReportPayload::new(
        "annotations",
        &report(),
        "2026-01-01T00:00:00+00:00".to_string(),
    );
    let rendered = serde_json::to_string_pretty(&payload).expect("serialize");
    insta::assert_snapshot!(rendered, @r#"
    {
      "schema": "aiv.validation-report",
      "schema_version": 1,
      "generated_at": "2026-01-01T00:00:00+00:00",
      "batch": "annotations",
      "totals": {
        "records": 2,
        "processed": 2,
        "valid": 1,
        "invalid_lines": 1,
        "errors": 2,
        "aborted": false
      },
      "counts": {
        "DuplicateUuid": 1,
        "InvalidOption": 1
      },
      "errors": [
        {
          "line": 2,
          "kind": "InvalidOption",
          "category": "Cross Reference",
          "field": "answer.schemaId",
          "message": "option opt_c in answer.schemaId is not an option of R1; expected one of [opt_a, opt_b]",
          "suggestion": "Select one of the options declared for the classification."
        },
        {
          "line": 2,
          "kind": "DuplicateUuid",
          "category": "Uniqueness",
          "field": "uuid",
          "message": "uuid u1 already used on line 1; uuids must be unique in an import",
          "suggestion": "Give every annotation in the import its own uuid."
        }
      ]
    }
    "#);
}

#[test]
fn report_is_written_to_output_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path =
        write_report_json(&dir.path().join("reports"), "annotations", &report()).expect("write");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(REPORT_FILE_NAME));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(written["schema_version"], json!(1));
    assert_eq!(written["errors"].as_array().map(Vec::len), Some(2));
}
