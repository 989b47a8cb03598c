//! Polygon model: a closed vertex loop with its drawing styles.

use std::collections::HashSet;

use crate::error::{Result, ScanfillError};
use crate::scanline::{self, SpansByRow, Vertex};

/// Stroke and fill colors (RGBA) plus outline width in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    pub stroke: [u8; 4],
    pub stroke_width: u32,
    pub fill: [u8; 4],
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            stroke: [20, 20, 20, 255],
            stroke_width: 2,
            fill: [60, 140, 255, 160],
        }
    }
}

/// A closed polygon. The last vertex implicitly connects to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    /// Inner rings, filled as holes under the even-odd rule.
    pub holes: Vec<Vec<Vertex>>,
    pub styles: Styles,
}

impl Polygon {
    /// Creates a polygon with default styles and no holes.
    ///
    /// A trailing vertex equal to the first one is dropped.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices: strip_closing_vertex(vertices),
            holes: Vec::new(),
            styles: Styles::default(),
        }
    }

    pub fn with_holes(mut self, holes: Vec<Vec<Vertex>>) -> Self {
        self.holes = holes.into_iter().map(strip_closing_vertex).collect();
        self
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Number of distinct vertex positions in the outer ring.
    pub fn distinct_vertices(&self) -> usize {
        self.vertices
            .iter()
            .map(|v| (v.x.to_bits(), v.y.to_bits()))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Degenerate if fewer than 3 vertices, or fewer than 3 distinct ones.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.distinct_vertices() < 3
    }

    /// Rejects degenerate polygons before they reach the rasterizer.
    pub fn validate(&self) -> Result<()> {
        if self.is_degenerate() {
            return Err(ScanfillError::DegeneratePolygon {
                vertices: self.vertices.len(),
                distinct: self.distinct_vertices(),
            });
        }
        Ok(())
    }

    /// The outer ring followed by every hole.
    pub fn rings(&self) -> Vec<&[Vertex]> {
        std::iter::once(self.vertices.as_slice())
            .chain(self.holes.iter().map(Vec::as_slice))
            .collect()
    }

    /// Fill spans for this polygon, holes included.
    pub fn spans(&self) -> SpansByRow {
        if self.holes.is_empty() {
            scanline::fill(&self.vertices)
        } else {
            scanline::fill_rings(&self.rings())
        }
    }
}

fn strip_closing_vertex(mut ring: Vec<Vertex>) -> Vec<Vertex> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanline::Span;
    use geo::coord;

    #[test]
    fn test_default_styles() {
        let styles = Styles::default();
        assert_eq!(styles.stroke, [20, 20, 20, 255]);
        assert_eq!(styles.stroke_width, 2);
        assert_eq!(styles.fill, [60, 140, 255, 160]);
    }

    #[test]
    fn test_closing_vertex_is_stripped() {
        let polygon = Polygon::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 4.0, y: 0.0 },
            coord! { x: 4.0, y: 4.0 },
            coord! { x: 0.0, y: 0.0 },
        ]);
        assert_eq!(polygon.vertices.len(), 3);
    }

    #[test]
    fn test_too_few_vertices_is_degenerate() {
        let polygon = Polygon::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 4.0 }]);
        assert!(polygon.is_degenerate());
    }

    #[test]
    fn test_repeated_vertices_is_degenerate() {
        let polygon = Polygon::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 4.0, y: 4.0 },
            coord! { x: 4.0, y: 4.0 },
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 4.0, y: 4.0 },
        ]);
        assert_eq!(polygon.distinct_vertices(), 2);
        assert!(polygon.is_degenerate());

        let err = polygon.validate().unwrap_err();
        assert!(matches!(
            err,
            ScanfillError::DegeneratePolygon { vertices: 5, distinct: 2 }
        ));
    }

    #[test]
    fn test_valid_polygon() {
        let polygon = Polygon::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 4.0, y: 0.0 },
            coord! { x: 0.0, y: 4.0 },
        ]);
        assert!(!polygon.is_degenerate());
        assert!(polygon.validate().is_ok());
    }

    #[test]
    fn test_spans_with_hole() {
        let polygon = Polygon::new(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 0.0, y: 10.0 },
        ])
        .with_holes(vec![vec![
            coord! { x: 3.0, y: 3.0 },
            coord! { x: 7.0, y: 3.0 },
            coord! { x: 7.0, y: 7.0 },
            coord! { x: 3.0, y: 7.0 },
            coord! { x: 3.0, y: 3.0 },
        ]]);

        assert_eq!(polygon.holes[0].len(), 4);

        let spans = polygon.spans();
        assert_eq!(spans[&0], vec![Span::new(0, 10)]);
        assert_eq!(spans[&5], vec![Span::new(0, 3), Span::new(7, 10)]);
    }
}
