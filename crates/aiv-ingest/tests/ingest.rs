use std::fs;

use serde_json::json;

use aiv_ingest::{
    IngestError, load_data_rows, load_ontology, load_project_context, read_ndjson_file,
    write_ndjson_file,
};
use aiv_model::ErrorKind;

#[test]
fn reads_records_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.ndjson");
    fs::write(
        &path,
        "{\"uuid\":\"u1\",\"answer\":\"a\"}\n\n{\"uuid\":\"u2\",\"answer\":\"b\"}\n",
    )
    .unwrap();

    let records = read_ndjson_file(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].line, 2);
    assert_eq!(records[1].uuid(), Some("u2"));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_ndjson_file(&dir.path().join("absent.ndjson")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn data_rows_accept_three_layouts() {
    let dir = tempfile::tempdir().unwrap();

    let ids = dir.path().join("ids.json");
    fs::write(&ids, r#"["d1", "d2"]"#).unwrap();
    assert_eq!(load_data_rows(&ids).unwrap().len(), 2);

    let objects = dir.path().join("rows.json");
    fs::write(&objects, r#"[{"id": "d1"}, {"uid": "d2", "externalId": "x"}]"#).unwrap();
    let rows = load_data_rows(&objects).unwrap();
    assert!(rows.contains("d2"));

    let text = dir.path().join("rows.txt");
    fs::write(&text, "# exported rows\nd1\n\n  d3  \n").unwrap();
    let rows = load_data_rows(&text).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.contains("d3"));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "[1, 2]").unwrap();
    assert!(matches!(
        load_data_rows(&bad).unwrap_err(),
        IngestError::InvalidDataRows { .. }
    ));
}

#[test]
fn ontology_may_be_wrapped_in_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let ontology = dir.path().join("ontology.json");
    let rows = dir.path().join("rows.txt");
    fs::write(
        &ontology,
        json!({"normalized": {"tools": [{"featureSchemaId": "P1", "tool": "polygon"}]}}).to_string(),
    )
    .unwrap();
    fs::write(&rows, "d1\n").unwrap();

    let context = load_project_context(&ontology, &rows).unwrap();
    assert!(context.schemas.contains("P1"));
    assert!(context.data_rows.contains("d1"));
}

#[test]
fn malformed_ontology_keeps_its_kind() {
    let dir = tempfile::tempdir().unwrap();
    let ontology = dir.path().join("ontology.json");
    fs::write(&ontology, r#"{"tools": [{"tool": "polygon"}]}"#).unwrap();

    let IngestError::Ontology { source, .. } = load_ontology(&ontology).unwrap_err() else {
        panic!("expected an ontology error");
    };
    assert_eq!(source.kind(), ErrorKind::MalformedOntology);
    assert!(source.to_string().contains("tools[0] is missing featureSchemaId"));
}

#[test]
fn writer_refuses_empty_batch_and_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("valid.ndjson");
    assert!(matches!(
        write_ndjson_file(&path, &[]).unwrap_err(),
        IngestError::EmptyBatch
    ));

    let record = json!({"uuid": "u1", "schemaId": "T1", "dataRow": {"id": "d1"}, "answer": "hi"});
    write_ndjson_file(&path, &[record]).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "{\"uuid\":\"u1\",\"schemaId\":\"T1\",\"dataRow\":{\"id\":\"d1\"},\"answer\":\"hi\"}\n"
    );
}
