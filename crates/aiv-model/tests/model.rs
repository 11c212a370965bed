use aiv_model::{
    Annotation, ErrorKind, FailureMode, Payload, Point, Scope, ToolKind, ValidationOptions,
};

#[test]
fn options_default_to_fail_fast_sequential() {
    let options = ValidationOptions::default();
    assert_eq!(options.failure_mode, FailureMode::FailFast);
    assert!(options.is_fail_fast());
    assert_eq!(options.threads, None);
    assert!(!options.strict_ids);
}

#[test]
fn options_deserialize_with_missing_fields() {
    let options: ValidationOptions =
        serde_json::from_str(r#"{"failure_mode": "collect-all", "threads": 4}"#)
            .expect("deserialize options");
    assert_eq!(options.failure_mode, FailureMode::CollectAll);
    assert_eq!(options.threads, Some(4));
    assert_eq!(options.max_errors, None);
}

#[test]
fn payload_kind_matches_ontology_names() {
    let polygon = Payload::Polygon(vec![Point { x: 0.0, y: 0.0 }]);
    assert_eq!(polygon.kind(), ToolKind::Polygon);
    assert_eq!(polygon.kind().as_str(), "polygon");
    assert_eq!(Payload::Polyline(vec![]).kind().as_str(), "line");
    assert!(polygon.selected_options().is_empty());

    let checklist = Payload::CheckList(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(checklist.selected_options(), ["a", "b"]);
}

#[test]
fn annotation_reports_nesting() {
    let annotation = Annotation {
        schema_id: "T1".to_string(),
        uuid: "u1".to_string(),
        data_row_id: "d1".to_string(),
        scope: Scope::Nested,
        payload: Payload::Text("hello".to_string()),
        classifications: vec![],
        frames: vec![],
    };
    assert!(annotation.is_nested());
    assert_eq!(annotation.kind(), ToolKind::Text);
}

#[test]
fn tool_kind_serializes_kebab_case() {
    let json = serde_json::to_string(&ToolKind::NamedEntity).expect("serialize kind");
    assert_eq!(json, "\"named-entity\"");
    let kind: ErrorKind = serde_json::from_str("\"DuplicateUuid\"").expect("deserialize kind");
    assert_eq!(kind, ErrorKind::DuplicateUuid);
}
