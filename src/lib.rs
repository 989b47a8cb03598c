//! Even-odd polygon scanline fill.
//!
//! [`scanline::fill`] turns a closed vertex loop into per-row pixel spans
//! using an Edge Table / Active Edge Table sweep. The other modules wrap it
//! into a small tool: reading polygons from files, painting spans onto an RGBA
//! canvas and saving PNG.

pub mod error;
pub mod input;
pub mod math;
pub mod polygon;
pub mod render;
pub mod scanline;

pub use polygon::{Polygon, Styles};
pub use scanline::{fill, fill_par, fill_rings, fill_rings_par, Span, SpansByRow, Vertex};
