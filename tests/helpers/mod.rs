// Shared shapes and span queries for the integration tests.

#![allow(dead_code)]

use geo::coord;
use scanfill::{SpansByRow, Vertex};

pub fn triangle() -> Vec<Vertex> {
    vec![
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 0.0, y: 10.0 },
    ]
}

pub fn rectangle() -> Vec<Vertex> {
    vec![
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 10.0, y: 10.0 },
        coord! { x: 0.0, y: 10.0 },
    ]
}

/// Two triangles meeting at (5, 5).
pub fn bowtie() -> Vec<Vertex> {
    vec![
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 10.0, y: 10.0 },
        coord! { x: 10.0, y: 0.0 },
        coord! { x: 0.0, y: 10.0 },
    ]
}

/// Concave arrow with fractional coordinates.
pub fn arrow() -> Vec<Vertex> {
    vec![
        coord! { x: 1.3, y: 4.2 },
        coord! { x: 12.7, y: 4.2 },
        coord! { x: 12.7, y: 0.6 },
        coord! { x: 20.1, y: 8.4 },
        coord! { x: 12.7, y: 16.9 },
        coord! { x: 12.7, y: 12.1 },
        coord! { x: 1.3, y: 12.1 },
        coord! { x: 5.8, y: 8.3 },
    ]
}

/// Concave shape whose inverse slopes are all dyadic, so accumulated and
/// interpolated crossings agree exactly.
pub fn zigzag() -> Vec<Vertex> {
    vec![
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 8.0, y: 8.0 },
        coord! { x: 16.0, y: 0.0 },
        coord! { x: 20.0, y: 8.0 },
        coord! { x: 18.0, y: 24.0 },
        coord! { x: 8.0, y: 16.0 },
        coord! { x: 0.0, y: 24.0 },
    ]
}

/// Five-pointed star drawn as a single self-intersecting loop.
pub fn pentagram(cx: f64, cy: f64, radius: f64) -> Vec<Vertex> {
    (0..5)
        .map(|i| {
            let angle = (-90.0 + 144.0 * i as f64).to_radians();
            coord! { x: cx + radius * angle.cos(), y: cy + radius * angle.sin() }
        })
        .collect()
}

pub fn regular_polygon(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<Vertex> {
    (0..sides)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / sides as f64;
            coord! { x: cx + radius * angle.cos(), y: cy + radius * angle.sin() }
        })
        .collect()
}

/// True if pixel (x, y) lies in one of the row's spans.
pub fn covered(spans: &SpansByRow, x: i32, y: i32) -> bool {
    spans
        .get(&y)
        .is_some_and(|row| row.iter().any(|s| s.x_left <= x && x <= s.x_right))
}

pub fn pixel_count(spans: &SpansByRow) -> u64 {
    spans.values().flatten().map(|s| s.width()).sum()
}

/// Spans must be ordered left to right with no shared pixel.
pub fn assert_rows_well_formed(spans: &SpansByRow) {
    for (y, row) in spans {
        assert!(!row.is_empty(), "row {} present with no spans", y);
        for span in row {
            assert!(span.x_left <= span.x_right, "row {}: inverted span {:?}", y, span);
        }
        for pair in row.windows(2) {
            assert!(
                pair[0].x_right < pair[1].x_left,
                "row {}: overlapping spans {:?} and {:?}",
                y,
                pair[0],
                pair[1]
            );
        }
    }
}
