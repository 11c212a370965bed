//! Variant resolution: raw JSON line to typed [`Annotation`].
//!
//! Resolution picks the variant by determinant fields, rejects undeclared
//! fields, then parses the payload with path-aware errors. Nested
//! classifications are resolved with the classification shapes only and get
//! a deterministic placeholder uuid plus the sentinel data-row id.

use serde_json::{Map, Value};
use uuid::Uuid;

use aiv_model::{
    Annotation, BoundingBox, FrameRange, MaskRef, NESTED_DATA_ROW_ID, Payload, Result, Scope,
    TextLocation, ToolKind, ValidationError, ValidationOptions, is_platform_id,
};

use crate::fields::{
    array, child_path, index_path, integer, json_type, number, object, point, points, required,
    schema_ref, string,
};

/// Shapes a top-level record may take.
pub const TOP_LEVEL_SHAPES: &[ToolKind] = ToolKind::all();

/// Shapes a nested classification may take.
pub const NESTED_SHAPES: &[ToolKind] = &[ToolKind::Text, ToolKind::Radio, ToolKind::Checklist];

/// Minimum length of a mask `instanceURI`.
const MIN_INSTANCE_URI_LEN: usize = 5;

/// Resolve a top-level record.
pub fn resolve(value: &Value, options: &ValidationOptions) -> Result<Annotation> {
    let map = value.as_object().ok_or(ValidationError::NotAnObject {
        found: json_type(value),
    })?;
    let kind = select_variant(map, TOP_LEVEL_SHAPES, "")?;
    forbid_extra_fields(map, kind, Scope::TopLevel, "")?;

    let uuid = string(map, "", "uuid")?;
    if options.strict_ids && Uuid::parse_str(&uuid).is_err() {
        return Err(ValidationError::invalid_field("uuid", "a UUID", uuid));
    }
    let schema_id = platform_id(string(map, "", "schemaId")?, "schemaId", options)?;
    let data_row = object(
        required(map, "dataRow", "dataRow", "an object with keys [id]")?,
        "dataRow",
        &["id"],
    )?;
    let data_row_id = platform_id(string(data_row, "dataRow", "id")?, "dataRow.id", options)?;

    let payload = parse_payload(map, kind, "", options)?;

    let classifications = match map.get("classifications") {
        Some(value) => array(value, "classifications", "an array of classifications")?
            .iter()
            .enumerate()
            .map(|(idx, item)| resolve_nested(item, idx, &uuid, options))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let frames = match map.get("frames") {
        Some(value) => parse_frames(value)?,
        None => Vec::new(),
    };

    Ok(Annotation {
        schema_id,
        uuid,
        data_row_id,
        scope: Scope::TopLevel,
        payload,
        classifications,
        frames,
    })
}

fn resolve_nested(
    value: &Value,
    idx: usize,
    parent_uuid: &str,
    options: &ValidationOptions,
) -> Result<Annotation> {
    let path = index_path("classifications", idx);
    let map = object_any(value, &path)?;
    let kind = select_variant(map, NESTED_SHAPES, &path)?;
    forbid_extra_fields(map, kind, Scope::Nested, &path)?;

    let schema_id = platform_id(
        string(map, &path, "schemaId")?,
        &child_path(&path, "schemaId"),
        options,
    )?;
    let payload = parse_payload(map, kind, &path, options)?;

    Ok(Annotation {
        schema_id,
        uuid: nested_uuid(parent_uuid, idx),
        data_row_id: NESTED_DATA_ROW_ID.to_string(),
        scope: Scope::Nested,
        payload,
        classifications: Vec::new(),
        frames: Vec::new(),
    })
}

/// Placeholder uuid of the `idx`-th classification nested under `parent_uuid`.
///
/// Derived with UUIDv5 so repeated runs over the same batch agree.
pub fn nested_uuid(parent_uuid: &str, idx: usize) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{parent_uuid}/{idx}").as_bytes()).to_string()
}

/// Pick the variant whose determinant fields best match `map`.
///
/// A candidate qualifies only when all its determinant fields are present;
/// the qualifying candidate with the most determinants wins. Text and Radio
/// share `answer` and are told apart by the answer's JSON type.
pub fn select_variant(
    map: &Map<String, Value>,
    candidates: &[ToolKind],
    path: &str,
) -> Result<ToolKind> {
    let qualifying: Vec<(ToolKind, usize)> = candidates
        .iter()
        .filter_map(|kind| {
            let determinants = kind.determinants();
            let present = determinants
                .iter()
                .filter(|field| map.contains_key(**field))
                .count();
            (present == determinants.len()).then_some((*kind, present))
        })
        .collect();

    let best = qualifying.iter().map(|(_, score)| *score).max().unwrap_or(0);
    let winners: Vec<ToolKind> = qualifying
        .into_iter()
        .filter(|(_, score)| *score == best)
        .map(|(kind, _)| kind)
        .collect();

    let shares_answer = |kind: &ToolKind| matches!(kind, ToolKind::Text | ToolKind::Radio);
    if !winners.is_empty() && winners.iter().all(shares_answer) {
        return answer_variant(map, path);
    }
    if let [kind] = winners.as_slice() {
        return Ok(*kind);
    }
    Err(ValidationError::AmbiguousOrUnknownVariant {
        present: map.keys().map(|key| child_path(path, key)).collect(),
        matched: winners,
        candidates: candidates.to_vec(),
    })
}

fn answer_variant(map: &Map<String, Value>, path: &str) -> Result<ToolKind> {
    match map.get("answer") {
        Some(Value::Object(_)) => Ok(ToolKind::Radio),
        Some(Value::String(_)) => Ok(ToolKind::Text),
        other => Err(ValidationError::AnswerTypeMismatch {
            field: child_path(path, "answer"),
            found: other.map_or("nothing", json_type),
        }),
    }
}

/// Fields a variant declares in the given scope.
pub fn allowed_fields(kind: ToolKind, scope: Scope) -> Vec<&'static str> {
    let mut fields = match scope {
        Scope::TopLevel => vec!["uuid", "schemaId", "dataRow"],
        Scope::Nested => vec!["schemaId"],
    };
    fields.extend_from_slice(kind.determinants());
    if scope == Scope::TopLevel {
        if !kind.is_classification() {
            fields.push("classifications");
        }
        if kind.supports_frames() {
            fields.push("frames");
        }
    }
    fields
}

fn forbid_extra_fields(
    map: &Map<String, Value>,
    kind: ToolKind,
    scope: Scope,
    path: &str,
) -> Result<()> {
    let allowed = allowed_fields(kind, scope);
    let extra: Vec<String> = map
        .keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .map(|key| child_path(path, key))
        .collect();
    if extra.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::ExtraFieldsForbidden {
            kind,
            fields: extra,
        })
    }
}

fn parse_payload(
    map: &Map<String, Value>,
    kind: ToolKind,
    path: &str,
    options: &ValidationOptions,
) -> Result<Payload> {
    let field = |key: &str| {
        let field_path = child_path(path, key);
        required(map, key, &field_path, "a value").map(|value| (value, field_path))
    };

    let payload = match kind {
        ToolKind::Polygon => {
            let (value, at) = field("polygon")?;
            Payload::Polygon(points(value, &at)?)
        }
        ToolKind::Line => {
            let (value, at) = field("line")?;
            Payload::Polyline(points(value, &at)?)
        }
        ToolKind::Rectangle => {
            let (value, at) = field("bbox")?;
            let bbox = object(value, &at, &["top", "left", "height", "width"])?;
            Payload::Rectangle(BoundingBox {
                top: number(bbox, &at, "top")?,
                left: number(bbox, &at, "left")?,
                height: number(bbox, &at, "height")?,
                width: number(bbox, &at, "width")?,
            })
        }
        ToolKind::Point => {
            let (value, at) = field("point")?;
            Payload::Point(point(value, &at)?)
        }
        ToolKind::NamedEntity => {
            let (value, at) = field("location")?;
            let location = object(value, &at, &["start", "end"])?;
            Payload::NamedEntity(TextLocation {
                start: integer(location, &at, "start")?,
                end: integer(location, &at, "end")?,
            })
        }
        ToolKind::Superpixel => {
            let (value, at) = field("mask")?;
            Payload::Mask(parse_mask(value, &at)?)
        }
        ToolKind::Text => {
            let (value, at) = field("answer")?;
            let answer = value
                .as_str()
                .ok_or_else(|| ValidationError::invalid_field(&at, "a string", json_type(value)))?;
            Payload::Text(answer.to_string())
        }
        ToolKind::Radio => {
            let (value, at) = field("answer")?;
            let option = schema_ref(value, &at)?;
            Payload::Radio(platform_id(option, &child_path(&at, "schemaId"), options)?)
        }
        ToolKind::Checklist => {
            let (value, at) = field("answers")?;
            let items = array(value, &at, "an array of {schemaId} answers")?;
            if items.is_empty() {
                return Err(ValidationError::invalid_field(
                    at,
                    "at least one answer",
                    "an empty array",
                ));
            }
            let answers = items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let item_path = index_path(&at, idx);
                    let option = schema_ref(item, &item_path)?;
                    platform_id(option, &child_path(&item_path, "schemaId"), options)
                })
                .collect::<Result<Vec<_>>>()?;
            Payload::CheckList(answers)
        }
    };
    Ok(payload)
}

fn parse_mask(value: &Value, path: &str) -> Result<MaskRef> {
    let mask = object(value, path, &["instanceURI", "colorRGB"])?;

    let uri_path = child_path(path, "instanceURI");
    let instance_uri = string(mask, path, "instanceURI")?;
    if instance_uri.chars().count() < MIN_INSTANCE_URI_LEN {
        return Err(ValidationError::invalid_field(
            uri_path,
            format!("a URI of at least {MIN_INSTANCE_URI_LEN} characters"),
            format!("{instance_uri:?}"),
        ));
    }

    let color_path = child_path(path, "colorRGB");
    let color = required(mask, "colorRGB", &color_path, "an array of three integers")?;
    let invalid_color = || ValidationError::InvalidColor {
        field: color_path.clone(),
        found: color.to_string(),
    };
    let channels = color.as_array().ok_or_else(invalid_color)?;
    let color_rgb = channels
        .iter()
        .map(|channel| channel.as_i64().ok_or_else(invalid_color))
        .collect::<Result<Vec<_>>>()?;

    Ok(MaskRef {
        instance_uri,
        color_rgb,
    })
}

fn parse_frames(value: &Value) -> Result<Vec<FrameRange>> {
    array(value, "frames", "an array of {start, end} ranges")?
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let path = index_path("frames", idx);
            let range = object(item, &path, &["start", "end"])?;
            Ok(FrameRange {
                start: integer(range, &path, "start")?,
                end: integer(range, &path, "end")?,
            })
        })
        .collect()
}

fn object_any<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_field(path, "an object", json_type(value)))
}

fn platform_id(id: String, path: &str, options: &ValidationOptions) -> Result<String> {
    if options.strict_ids && !is_platform_id(&id) {
        return Err(ValidationError::invalid_field(
            path,
            format!("a {}-character id", aiv_model::PLATFORM_ID_LEN),
            id,
        ));
    }
    Ok(id)
}
