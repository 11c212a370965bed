//! Tool kinds shared by ontology entries and annotation records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of annotation shapes an ontology node can declare.
///
/// The serialized names match the ontology's `tool` / `type` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Polygon,
    Line,
    Rectangle,
    Point,
    NamedEntity,
    Superpixel,
    Text,
    Radio,
    Checklist,
}

impl ToolKind {
    /// Every kind, tools first and classifications last.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Polygon,
            Self::Line,
            Self::Rectangle,
            Self::Point,
            Self::NamedEntity,
            Self::Superpixel,
            Self::Text,
            Self::Radio,
            Self::Checklist,
        ]
    }

    /// Parse the kind name used by ontology snapshots.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "polygon" => Some(Self::Polygon),
            "line" => Some(Self::Line),
            "rectangle" => Some(Self::Rectangle),
            "point" => Some(Self::Point),
            "named-entity" => Some(Self::NamedEntity),
            "superpixel" => Some(Self::Superpixel),
            "text" => Some(Self::Text),
            "radio" => Some(Self::Radio),
            "checklist" => Some(Self::Checklist),
            _ => None,
        }
    }

    /// Ontology name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polygon => "polygon",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Point => "point",
            Self::NamedEntity => "named-entity",
            Self::Superpixel => "superpixel",
            Self::Text => "text",
            Self::Radio => "radio",
            Self::Checklist => "checklist",
        }
    }

    /// Human-readable label of the record variant.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Polygon => "Polygon",
            Self::Line => "Polyline",
            Self::Rectangle => "Rectangle",
            Self::Point => "Point",
            Self::NamedEntity => "NamedEntity",
            Self::Superpixel => "Mask",
            Self::Text => "Text",
            Self::Radio => "Radio",
            Self::Checklist => "CheckList",
        }
    }

    /// Classification kinds may be nested under tools.
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::Text | Self::Radio | Self::Checklist)
    }

    /// Choice kinds carry a set of selectable options.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Checklist)
    }

    /// Record fields whose presence signals this variant.
    pub fn determinants(&self) -> &'static [&'static str] {
        match self {
            Self::Polygon => &["polygon"],
            Self::Line => &["line"],
            Self::Rectangle => &["bbox"],
            Self::Point => &["point"],
            Self::NamedEntity => &["location"],
            Self::Superpixel => &["mask"],
            Self::Text | Self::Radio => &["answer"],
            Self::Checklist => &["answers"],
        }
    }

    /// Video frame ranges are only accepted on top-level choice classifications.
    pub fn supports_frames(&self) -> bool {
        self.has_options()
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
