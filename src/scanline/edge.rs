//! Scanline edge generation and management.
//!
//! This module provides the `Edge` and `EdgeTable` structures used by the
//! scanline fill algorithm. Rows are sampled at their centers: row `y` crosses
//! an edge when `y + 0.5` lies in the half-open range `[y_min, y_max)`.

use std::collections::BTreeMap;

use super::Vertex;

/// Edges whose vertical extent is below this are treated as horizontal.
pub const EPSILON: f64 = 1e-9;

/// Representable row range. Edges reaching further are cut off here.
const ROW_MIN: f64 = i32::MIN as f64;
const ROW_MAX: f64 = i32::MAX as f64;

/// Represents an edge in the scanline algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// First scanline (inclusive) whose center crosses the edge.
    pub y_start: i32,
    /// Last scanline (inclusive) whose center crosses the edge. Computed as
    /// `ceil(y_max - 0.5) - 1` so a vertex on a row center is counted once.
    pub y_end: i32,
    /// X coordinate at the center of the current scanline.
    pub x_current: f64,
    /// Reciprocal of the slope (dx/dy). Used to update x_current for each new scanline.
    pub inv_slope: f64,
    /// Lower endpoint, kept for direct interpolation.
    origin: Vertex,
}

impl Edge {
    /// Creates a new `Edge` from two points.
    ///
    /// Returns `None` if the edge is horizontal, has a non-finite endpoint, or
    /// is too short to cross any row center.
    pub fn new(p1: Vertex, p2: Vertex) -> Option<Self> {
        if !(p1.x.is_finite() && p1.y.is_finite() && p2.x.is_finite() && p2.y.is_finite()) {
            return None;
        }

        if (p2.y - p1.y).abs() < EPSILON {
            return None;
        }

        let (p_start, p_end) = if p1.y < p2.y { (p1, p2) } else { (p2, p1) };
        let inv_slope = (p_end.x - p_start.x) / (p_end.y - p_start.y);

        // y + 0.5 >= y_min and y + 0.5 < y_max
        let y_start = (p_start.y - 0.5).ceil();
        let y_end = (p_end.y - 0.5).ceil() - 1.0;
        if y_start > y_end || y_end < ROW_MIN || y_start > ROW_MAX {
            return None;
        }

        let mut edge = Edge {
            y_start: y_start.clamp(ROW_MIN, ROW_MAX) as i32,
            y_end: y_end.clamp(ROW_MIN, ROW_MAX) as i32,
            x_current: 0.0,
            inv_slope,
            origin: p_start,
        };
        // Evaluated at the clamped row, which is where the sweep starts.
        edge.x_current = edge.x_at(edge.y_start);
        Some(edge)
    }

    /// Returns true if the center of row `y` crosses this edge.
    pub fn covers(&self, y: i32) -> bool {
        self.y_start <= y && y <= self.y_end
    }

    /// X coordinate where the center of row `y` crosses the edge's line,
    /// interpolated from the lower endpoint rather than accumulated.
    pub fn x_at(&self, y: i32) -> f64 {
        self.origin.x + (y as f64 + 0.5 - self.origin.y) * self.inv_slope
    }
}

/// Edge Table keyed by the scanline at which each edge becomes active.
#[derive(Debug, Default)]
pub struct EdgeTable {
    entries: BTreeMap<i32, Vec<Edge>>,
    y_last: Option<i32>,
}

impl EdgeTable {
    /// Creates a new empty `EdgeTable`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from several closed rings.
    pub fn from_rings(rings: &[&[Vertex]]) -> Self {
        let mut table = Self::new();
        for ring in rings {
            table.extract_from_ring(ring);
        }
        table
    }

    /// Adds an edge under its activation scanline.
    pub fn add_edge(&mut self, edge: Edge) {
        self.y_last = Some(self.y_last.map_or(edge.y_end, |y| y.max(edge.y_end)));
        self.entries.entry(edge.y_start).or_default().push(edge);
    }

    /// Extracts edges from a single closed ring, including the wrap-around
    /// edge from the last vertex back to the first.
    ///
    /// Rings with fewer than 3 vertices contribute nothing.
    pub fn extract_from_ring(&mut self, ring: &[Vertex]) {
        if ring.len() < 3 {
            return;
        }

        for i in 0..ring.len() {
            let p1 = ring[i];
            let p2 = ring[(i + 1) % ring.len()];

            if let Some(edge) = Edge::new(p1, p2) {
                self.add_edge(edge);
            }
        }
    }

    /// Edges activating at scanline `y`, in insertion order.
    pub fn edges_at(&self, y: i32) -> &[Edge] {
        self.entries.get(&y).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All edges, ordered by activation scanline.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.entries.values().flatten()
    }

    /// Inclusive range of rows touched by any edge, or `None` if empty.
    pub fn row_range(&self) -> Option<(i32, i32)> {
        let first = *self.entries.keys().next()?;
        Some((first, self.y_last?))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
