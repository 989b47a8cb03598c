//! Canvas geometry: polygon bounds and canvas sizing.

use geo::{BoundingRect, LineString};

use crate::scanline::Vertex;

/// Axis-aligned extent of a set of vertices, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates new bounds.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds of the given vertices, or `None` if there are none.
    pub fn of(vertices: &[Vertex]) -> Option<Self> {
        let rect = LineString::new(vertices.to_vec()).bounding_rect()?;
        Some(Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// Combined bounds of several rings. Empty rings are ignored.
    pub fn of_all<'a>(rings: impl IntoIterator<Item = &'a [Vertex]>) -> Option<Self> {
        rings
            .into_iter()
            .filter_map(Bounds::of)
            .reduce(|a, b| a.union(&b))
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// Canvas size that keeps every pixel up to the bounds' far corner visible,
/// plus `margin` pixels. Never smaller than 1x1.
pub fn canvas_dimensions(bounds: &Bounds, margin: u32) -> (u32, u32) {
    let extent = |max: f64| (max.max(0.0).ceil() as u32).saturating_add(margin).max(1);
    (extent(bounds.max_x), extent(bounds.max_y))
}

/// Translation moving the bounds' minimum corner to `(margin, margin)`.
pub fn fit_offset(bounds: &Bounds, margin: u32) -> (f64, f64) {
    (margin as f64 - bounds.min_x, margin as f64 - bounds.min_y)
}

/// Shifts every vertex by `offset`.
pub fn translate(vertices: &mut [Vertex], offset: (f64, f64)) {
    for v in vertices {
        v.x += offset.0;
        v.y += offset.1;
    }
}
