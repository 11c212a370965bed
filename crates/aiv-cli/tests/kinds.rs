use aiv_cli::commands::kind_rows;

#[test]
fn kinds_list_determinants_and_fields() {
    let rendered: Vec<String> = kind_rows().iter().map(|row| row.join(" | ")).collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    Polygon | polygon | polygon | uuid, schemaId, dataRow, classifications
    Polyline | line | line | uuid, schemaId, dataRow, classifications
    Rectangle | rectangle | bbox | uuid, schemaId, dataRow, classifications
    Point | point | point | uuid, schemaId, dataRow, classifications
    NamedEntity | named-entity | location | uuid, schemaId, dataRow, classifications
    Mask | superpixel | mask | uuid, schemaId, dataRow, classifications
    Text | text | answer | uuid, schemaId, dataRow
    Radio | radio | answer | uuid, schemaId, dataRow, frames
    CheckList | checklist | answers | uuid, schemaId, dataRow, frames
    ");
}
