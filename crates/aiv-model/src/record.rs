//! Typed annotation records.
//!
//! A raw NDJSON line resolves into exactly one [`Annotation`]. The payload
//! enum is closed, so every consumer matches all variants exhaustively.

use serde::{Deserialize, Serialize};

use crate::kind::ToolKind;

/// A single `{x, y}` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub width: f64,
}

/// Half-open character range `[start, end)` of a text entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLocation {
    pub start: i64,
    pub end: i64,
}

/// Superpixel mask reference.
///
/// Channels are kept as parsed so the color check can report what was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskRef {
    pub instance_uri: String,
    pub color_rgb: Vec<i64>,
}

/// Video frame range attached to a top-level choice classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

/// Variant-defining payload of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Free-form answer.
    Text(String),
    /// Selected option schema id.
    Radio(String),
    /// Selected option schema ids, in input order.
    CheckList(Vec<String>),
    Rectangle(BoundingBox),
    Point(Point),
    Polyline(Vec<Point>),
    Polygon(Vec<Point>),
    NamedEntity(TextLocation),
    Mask(MaskRef),
}

impl Payload {
    /// Tool kind the payload must be registered under in the ontology.
    pub fn kind(&self) -> ToolKind {
        match self {
            Payload::Text(_) => ToolKind::Text,
            Payload::Radio(_) => ToolKind::Radio,
            Payload::CheckList(_) => ToolKind::Checklist,
            Payload::Rectangle(_) => ToolKind::Rectangle,
            Payload::Point(_) => ToolKind::Point,
            Payload::Polyline(_) => ToolKind::Line,
            Payload::Polygon(_) => ToolKind::Polygon,
            Payload::NamedEntity(_) => ToolKind::NamedEntity,
            Payload::Mask(_) => ToolKind::Superpixel,
        }
    }

    /// Option ids selected by a choice payload (empty for other kinds).
    pub fn selected_options(&self) -> &[String] {
        match self {
            Payload::Radio(option) => std::slice::from_ref(option),
            Payload::CheckList(options) => options,
            _ => &[],
        }
    }
}

/// Where a record sits in its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Own uuid and data row, supplied by the caller.
    TopLevel,
    /// Nested under a tool; uuid and data row are synthesized placeholders.
    Nested,
}

/// A resolved annotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub schema_id: String,
    pub uuid: String,
    pub data_row_id: String,
    pub scope: Scope,
    pub payload: Payload,
    /// Sub-classifications; only tools carry them.
    pub classifications: Vec<Annotation>,
    /// Video frames; only top-level choice classifications carry them.
    pub frames: Vec<FrameRange>,
}

impl Annotation {
    pub fn kind(&self) -> ToolKind {
        self.payload.kind()
    }

    pub fn is_nested(&self) -> bool {
        self.scope == Scope::Nested
    }
}
