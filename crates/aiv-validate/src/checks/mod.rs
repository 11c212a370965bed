//! Field validators.
//!
//! Pure checks over a resolved [`Annotation`]; they run before any lookup in
//! the project context and recurse into nested classifications.

mod choice;
mod geometry;

pub use choice::check_unique_answers;
pub use geometry::{POLYGON_MIN_POINTS, POLYLINE_MIN_POINTS, check_color, check_points, check_range};

use aiv_model::{Annotation, Payload, Result};

use crate::fields::{child_path, index_path};

/// Run every field check on `annotation` and its nested classifications.
pub fn check_fields(annotation: &Annotation) -> Result<()> {
    check_at(annotation, "")
}

fn check_at(annotation: &Annotation, prefix: &str) -> Result<()> {
    check_payload(&annotation.payload, prefix)?;
    let nested_prefix = child_path(prefix, "classifications");
    for (idx, nested) in annotation.classifications.iter().enumerate() {
        check_at(nested, &index_path(&nested_prefix, idx))?;
    }
    Ok(())
}

fn check_payload(payload: &Payload, prefix: &str) -> Result<()> {
    match payload {
        Payload::Polygon(points) => {
            check_points(payload.kind(), points, &child_path(prefix, "polygon"))
        }
        Payload::Polyline(points) => {
            check_points(payload.kind(), points, &child_path(prefix, "line"))
        }
        Payload::NamedEntity(location) => check_range(*location, &child_path(prefix, "location")),
        Payload::Mask(mask) => check_color(mask, &child_path(prefix, "mask.colorRGB")),
        Payload::CheckList(answers) => {
            check_unique_answers(answers, &child_path(prefix, "answers"))
        }
        Payload::Text(_) | Payload::Radio(_) | Payload::Rectangle(_) | Payload::Point(_) => Ok(()),
    }
}
