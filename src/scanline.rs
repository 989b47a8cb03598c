//! Even-odd polygon fill using an Edge Table / Active Edge Table sweep.
//!
//! The rasterizer turns a closed vertex loop into horizontal pixel spans per
//! integer row. Both axes use pixel-center sampling: a row is crossed by an
//! edge when its center line `y + 0.5` is inside the edge's extent, and a span
//! covers the pixels from `ceil(x_left)` to `floor(x_right)` inclusive.
//!
//! Degenerate input never fails. Fewer than three vertices, horizontal-only
//! loops and non-finite coordinates simply produce fewer (or no) spans.

use geo::Coord;
use rayon::prelude::*;
use std::collections::BTreeMap;

pub mod edge;

use edge::{Edge, EdgeTable};

/// A polygon vertex.
pub type Vertex = Coord<f64>;

/// Spans per scanline. Rows without any span are absent.
pub type SpansByRow = BTreeMap<i32, Vec<Span>>;

/// An inclusive run of filled pixels on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub x_left: i32,
    pub x_right: i32,
}

impl Span {
    pub fn new(x_left: i32, x_right: i32) -> Self {
        Self { x_left, x_right }
    }

    /// Number of pixels covered. A span across the whole `i32` range holds
    /// 2^32 pixels, so this is wider than the coordinates.
    pub fn width(&self) -> u64 {
        u64::from(self.x_left.abs_diff(self.x_right)) + 1
    }
}

/// Fills a single closed polygon under the even-odd rule.
///
/// The last vertex connects back to the first; a repeated closing vertex is
/// harmless but not required.
pub fn fill(polygon: &[Vertex]) -> SpansByRow {
    fill_rings(&[polygon])
}

/// Fills several closed rings as one shape. Overlapping rings cancel out
/// under even-odd parity, so an inner ring leaves a hole.
pub fn fill_rings(rings: &[&[Vertex]]) -> SpansByRow {
    let table = EdgeTable::from_rings(rings);
    let mut result = SpansByRow::new();

    let Some((y_min, y_max)) = table.row_range() else {
        return result;
    };

    let mut active_edge_table: Vec<Edge> = Vec::new();
    let mut crossings: Vec<f64> = Vec::new();

    for y in y_min..=y_max {
        active_edge_table.extend(table.edges_at(y).iter().cloned());
        active_edge_table.retain(|edge| edge.y_end >= y);

        // Stable, so equal crossings keep activation order.
        active_edge_table.sort_by(|a, b| a.x_current.total_cmp(&b.x_current));

        crossings.clear();
        crossings.extend(active_edge_table.iter().map(|edge| edge.x_current));

        let spans = pair_crossings(&crossings);
        if !spans.is_empty() {
            result.insert(y, spans);
        }

        for edge in &mut active_edge_table {
            edge.x_current += edge.inv_slope;
        }
    }

    result
}

/// Same result as [`fill`], with rows computed on the rayon thread pool.
pub fn fill_par(polygon: &[Vertex]) -> SpansByRow {
    fill_rings_par(&[polygon])
}

/// Same result as [`fill_rings`], with rows computed on the rayon thread pool.
///
/// Each row interpolates its crossings directly from the edge endpoints, so
/// rows share no state once the Edge Table is built. Where the sequential
/// sweep accumulates rounding error the two may disagree by one ulp.
pub fn fill_rings_par(rings: &[&[Vertex]]) -> SpansByRow {
    let table = EdgeTable::from_rings(rings);

    let Some((y_min, y_max)) = table.row_range() else {
        return SpansByRow::new();
    };

    let edges: Vec<&Edge> = table.edges().collect();

    (y_min..=y_max)
        .into_par_iter()
        .filter_map(|y| {
            let mut crossings: Vec<f64> = edges
                .iter()
                .filter(|edge| edge.covers(y))
                .map(|edge| edge.x_at(y))
                .collect();
            crossings.sort_by(f64::total_cmp);

            let spans = pair_crossings(&crossings);
            (!spans.is_empty()).then_some((y, spans))
        })
        .collect()
}

/// Pairs sorted crossings `(0,1), (2,3), ...` into pixel spans.
///
/// A trailing unmatched crossing is dropped. Pairs that cover no pixel center
/// are skipped, and spans that touch the same pixel are merged so that the
/// output never overlaps.
fn pair_crossings(crossings: &[f64]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::with_capacity(crossings.len() / 2);

    for pair in crossings.chunks_exact(2) {
        let x_left = to_pixel(pair[0].ceil());
        let x_right = to_pixel(pair[1].floor());
        if x_left > x_right {
            continue;
        }

        match spans.last_mut() {
            Some(last) if x_left <= last.x_right => last.x_right = last.x_right.max(x_right),
            _ => spans.push(Span::new(x_left, x_right)),
        }
    }

    spans
}

/// Pins an integral crossing to the representable column range.
fn to_pixel(x: f64) -> i32 {
    x.clamp(i32::MIN as f64, i32::MAX as f64) as i32
}
