//! Raster painting of polygon spans and outlines.
//!
//! The fill comes from the scanline rasterizer; this module only turns spans
//! into pixels. Strokes use Bresenham's algorithm with a square brush. All
//! painting alpha-blends over what is already on the canvas.

use geo::coord;
use image::{ImageBuffer, Pixel, Rgba, RgbaImage};
use rayon::prelude::*;
use std::path::Path;

use crate::error::{Result, ScanfillError};
use crate::polygon::Polygon;
use crate::scanline::{SpansByRow, Vertex};

pub const MAX_DIMENSION: u32 = 20000;

/// RGBA pixel surface that polygons are painted onto.
pub struct Canvas {
    width: u32,
    height: u32,
    image: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    ///
    /// Rejects empty canvases and anything larger than `MAX_DIMENSION`.
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ScanfillError::InvalidDimensions { width, height });
        }

        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ScanfillError::ImageTooLarge {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }

        let image = ImageBuffer::from_pixel(width, height, Rgba(background));

        Ok(Self {
            width,
            height,
            image,
        })
    }

    /// Get image dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Fill then stroke a polygon using its own styles.
    pub fn draw_polygon(&mut self, polygon: &Polygon) {
        self.paint_spans(&polygon.spans(), polygon.styles.fill);

        self.stroke_ring(&polygon.vertices, polygon.styles.stroke, polygon.styles.stroke_width);
        for hole in &polygon.holes {
            self.stroke_ring(hole, polygon.styles.stroke, polygon.styles.stroke_width);
        }
    }

    /// Blend every pixel of every span with `color`.
    ///
    /// Rows and columns outside the canvas are clipped. Rows are painted in
    /// parallel since each one owns a disjoint slice of the buffer.
    pub fn paint_spans(&mut self, spans: &SpansByRow, color: [u8; 4]) {
        let width = self.width as i32;
        let color = Rgba(color);
        let stride = self.width as usize * 4;

        self.image
            .par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                let Some(row_spans) = spans.get(&(y as i32)) else {
                    return;
                };

                for span in row_spans {
                    let x_start = span.x_left.max(0);
                    let x_end = span.x_right.min(width - 1);
                    for x in x_start..=x_end {
                        let offset = x as usize * 4;
                        let pixel = Rgba::from_slice_mut(&mut row[offset..offset + 4]);
                        *pixel = blend(*pixel, color);
                    }
                }
            });
    }

    /// Draw the closed outline of a ring. A width of 0 draws nothing.
    pub fn stroke_ring(&mut self, ring: &[Vertex], color: [u8; 4], width: u32) {
        if width == 0 || ring.len() < 2 {
            return;
        }

        let color = Rgba(color);
        for (i, &from) in ring.iter().enumerate() {
            let to = ring[(i + 1) % ring.len()];
            self.draw_line(from, to, color, width);
        }
    }

    /// Draw a line segment using Bresenham's algorithm.
    ///
    /// Thick lines are drawn by stamping a square of pixels around each point
    /// of the ideal line. The segment is first clipped to the area the brush
    /// can reach, so far-off vertices cost nothing.
    fn draw_line(&mut self, from: Vertex, to: Vertex, color: Rgba<u8>, width: u32) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }

        let half_width = i64::from(width / 2);
        // Even widths extend one pixel less on the positive side.
        let far = half_width - i64::from(width % 2 == 0);

        let pad = (half_width + 1) as f64;
        let reach = (
            coord! { x: -pad, y: -pad },
            coord! { x: self.width as f64 + pad, y: self.height as f64 + pad },
        );
        let Some((from, to)) = clip_segment(from, to, reach) else {
            return;
        };

        let (x0, y0) = (from.x.floor() as i64, from.y.floor() as i64);
        let (x1, y1) = (to.x.floor() as i64, to.y.floor() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.stamp(x, y, half_width, far, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Blend the square `[x - near, x + far] x [y - near, y + far]`, limited
    /// to the canvas.
    fn stamp(&mut self, x: i64, y: i64, near: i64, far: i64, color: Rgba<u8>) {
        let x_start = (x - near).max(0);
        let y_start = (y - near).max(0);
        let x_end = (x + far).min(i64::from(self.width) - 1);
        let y_end = (y + far).min(i64::from(self.height) - 1);

        for py in y_start..=y_end {
            for px in x_start..=x_end {
                let pixel = self.image.get_pixel_mut(px as u32, py as u32);
                *pixel = blend(*pixel, color);
            }
        }
    }

    /// Save the image to a PNG file
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Liang-Barsky clip of a segment against the rectangle `(min, max)`.
///
/// Returns `None` when no part of the segment is inside. Endpoints already
/// inside are returned untouched.
fn clip_segment(from: Vertex, to: Vertex, (min, max): (Vertex, Vertex)) -> Option<(Vertex, Vertex)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, from.x - min.x),
        (dx, max.x - from.x),
        (-dy, from.y - min.y),
        (dy, max.y - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    let at = |t: f64| coord! { x: from.x + dx * t, y: from.y + dy * t };
    let start = if t0 > 0.0 { at(t0) } else { from };
    let end = if t1 < 1.0 { at(t1) } else { to };
    Some((start, end))
}

/// Alpha compositing of `src` over `dst` (Porter-Duff 'Over' operator).
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_a = src.0[3] as f32 / 255.0;
    let dst_a = dst.0[3] as f32 / 255.0;

    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a == 0.0 {
        return dst;
    }

    let channel = |s: u8, d: u8| -> u8 {
        let s = s as f32;
        let d = d as f32;
        ((s * src_a + d * dst_a * (1.0 - src_a)) / out_a).round() as u8
    };

    Rgba([
        channel(src.0[0], dst.0[0]),
        channel(src.0[1], dst.0[1]),
        channel(src.0[2], dst.0[2]),
        (out_a * 255.0).round() as u8,
    ])
}
