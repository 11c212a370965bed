//! Shape constraints: point counts, ranges and colors.

use aiv_model::{MaskRef, Point, Result, TextLocation, ToolKind, ValidationError};

/// Minimum number of points for a polygon.
pub const POLYGON_MIN_POINTS: usize = 3;

/// Minimum number of points for a polyline.
pub const POLYLINE_MIN_POINTS: usize = 2;

pub fn check_points(kind: ToolKind, points: &[Point], field: &str) -> Result<()> {
    let min_points = match kind {
        ToolKind::Polygon => POLYGON_MIN_POINTS,
        ToolKind::Line => POLYLINE_MIN_POINTS,
        _ => return Ok(()),
    };
    if points.len() < min_points {
        return Err(ValidationError::InvalidGeometry {
            kind,
            field: field.to_string(),
            min_points,
            found: points.len(),
        });
    }
    Ok(())
}

/// `0 <= start < end`.
pub fn check_range(location: TextLocation, field: &str) -> Result<()> {
    if location.start < 0 || location.start >= location.end {
        return Err(ValidationError::InvalidRange {
            field: field.to_string(),
            start: location.start,
            end: location.end,
        });
    }
    Ok(())
}

/// Exactly three channels, each in `[0, 255]`.
pub fn check_color(mask: &MaskRef, field: &str) -> Result<()> {
    let in_range = |channel: &i64| (0..=255).contains(channel);
    if mask.color_rgb.len() != 3 || !mask.color_rgb.iter().all(in_range) {
        return Err(ValidationError::InvalidColor {
            field: field.to_string(),
            found: format!("{:?}", mask.color_rgb),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn points(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point {
                x: i as f64,
                y: 0.0,
            })
            .collect()
    }

    #[test]
    fn polygon_needs_three_points() {
        assert!(check_points(ToolKind::Polygon, &points(2), "polygon").is_err());
        assert!(check_points(ToolKind::Polygon, &points(3), "polygon").is_ok());
        assert!(check_points(ToolKind::Line, &points(2), "line").is_ok());
    }

    #[test]
    fn color_needs_three_channels() {
        let mask = |color_rgb: Vec<i64>| MaskRef {
            instance_uri: "https://masks/1".to_string(),
            color_rgb,
        };
        assert!(check_color(&mask(vec![255, 0, 0]), "mask.colorRGB").is_ok());
        assert!(check_color(&mask(vec![255, 0]), "mask.colorRGB").is_err());
        let error = check_color(&mask(vec![256, 0, 0]), "mask.colorRGB").unwrap_err();
        assert_eq!(
            error.to_string(),
            "mask.colorRGB must be three channels in [0, 255], found [256, 0, 0]"
        );
    }

    proptest! {
        #[test]
        fn range_is_valid_iff_ordered_and_non_negative(start in -5i64..50, end in -5i64..50) {
            let verdict = check_range(TextLocation { start, end }, "location");
            prop_assert_eq!(verdict.is_ok(), start >= 0 && start < end);
        }

        #[test]
        fn point_minimum_is_exact(n in 0usize..8) {
            let polygon = check_points(ToolKind::Polygon, &points(n), "polygon");
            let line = check_points(ToolKind::Line, &points(n), "line");
            prop_assert_eq!(polygon.is_ok(), n >= POLYGON_MIN_POINTS);
            prop_assert_eq!(line.is_ok(), n >= POLYLINE_MIN_POINTS);
        }
    }
}
