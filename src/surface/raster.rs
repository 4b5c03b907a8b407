// src/surface/raster.rs
//
// A CPU surface backed by an RgbaImage.
// Strokes with a square brush, fills with even-odd scanlines and composites
// bitmaps source-over. Good enough for snapshots and headless rendering; it
// does no anti-aliasing.

use log::debug;
use nannou::image::{Rgba, RgbaImage};
use std::path::Path;

use super::path::{PathBuilder, PathOp, Subpath};
use super::{Surface, DEFAULT_ARC_RESOLUTION};
use crate::errors::Result;
use crate::models::parse_color;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct RasterSurface {
    canvas: RgbaImage,
    path: PathBuilder,
    stroke_color: Rgba<u8>,
    fill_color: Rgba<u8>,
    line_width: f32,
    arc_resolution: usize,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            path: PathBuilder::new(),
            stroke_color: BLACK,
            fill_color: BLACK,
            line_width: 1.0,
            arc_resolution: DEFAULT_ARC_RESOLUTION,
        }
    }

    pub fn with_arc_resolution(mut self, arc_resolution: usize) -> Self {
        self.arc_resolution = arc_resolution;
        self
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.canvas.width() && y < self.canvas.height() {
            Some(*self.canvas.get_pixel(x, y))
        } else {
            None
        }
    }

    pub fn stroke_color(&self) -> Rgba<u8> {
        self.stroke_color
    }

    pub fn fill_color(&self) -> Rgba<u8> {
        self.fill_color
    }

    /// Paints every pixel with `color`, ignoring unknown color strings
    pub fn fill_background(&mut self, color: &str) {
        match parse_color(color) {
            Some(rgba) => {
                for pixel in self.canvas.pixels_mut() {
                    *pixel = rgba;
                }
            }
            None => debug!("Ignoring unknown background color '{}'", color),
        }
    }

    /// Writes the canvas out, format chosen from the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.canvas.save(path.as_ref())?;
        debug!("Saved raster surface to {}", path.as_ref().display());
        Ok(())
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.canvas.width() as i64 && y < self.canvas.height() as i64
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if !self.in_bounds(x, y) {
            return;
        }
        let dst = self.canvas.get_pixel_mut(x as u32, y as u32);
        *dst = source_over(color, *dst);
    }

    fn stroke_segment(&mut self, start: (f32, f32), end: (f32, f32), color: Rgba<u8>) {
        let half = ((self.line_width - 1.0) / 2.0).round().max(0.0) as i64;

        // only walk the part of the segment the brush can reach
        let margin = half as f64 + 1.0;
        let bounds = (
            -margin,
            -margin,
            self.canvas.width() as f64 + margin,
            self.canvas.height() as f64 + margin,
        );
        let ((x0, y0), (x1, y1)) = match clip_segment(start, end, bounds) {
            Some(clipped) => clipped,
            None => return,
        };
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as i64;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let cx = (x0 + t * (x1 - x0)).round() as i64;
            let cy = (y0 + t * (y1 - y0)).round() as i64;
            for oy in -half..=half {
                for ox in -half..=half {
                    self.blend_pixel(cx + ox, cy + oy, color);
                }
            }
        }
    }

    fn fill_subpaths(&mut self, subpaths: &[Subpath], color: Rgba<u8>) {
        // every subpath is implicitly closed for filling
        let edges: Vec<((f32, f32), (f32, f32))> = subpaths
            .iter()
            .filter(|s| s.points.len() > 2)
            .flat_map(|s| {
                let n = s.points.len();
                (0..n).map(move |i| (s.points[i], s.points[(i + 1) % n]))
            })
            .collect();
        if edges.is_empty() {
            return;
        }

        let (min_y, max_y) = edges.iter().fold((f32::MAX, f32::MIN), |(lo, hi), (a, b)| {
            (lo.min(a.1).min(b.1), hi.max(a.1).max(b.1))
        });
        let first_row = min_y.floor().max(0.0) as i64;
        let last_row = (max_y.ceil() as i64).min(self.canvas.height() as i64);

        for row in first_row..last_row {
            let y = row as f32 + 0.5;
            let mut crossings: Vec<f32> = edges
                .iter()
                .filter_map(|&((x0, y0), (x1, y1))| {
                    let (lo, hi) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
                    if y < lo || y >= hi {
                        return None;
                    }
                    Some(x0 + (y - y0) / (y1 - y0) * (x1 - x0))
                })
                .collect();
            crossings.sort_by(|a, b| a.total_cmp(b));

            let last_col = self.canvas.width() as i64 - 1;
            for pair in crossings.chunks_exact(2) {
                let left = ((pair[0] - 0.5).ceil() as i64).max(0);
                let right = ((pair[1] - 0.5).floor() as i64).min(last_col);
                for col in left..=right {
                    self.blend_pixel(col, row, color);
                }
            }
        }
    }
}

/// Liang-Barsky clip of a segment to `(min_x, min_y, max_x, max_y)`.
/// Works in f64 so far off-canvas endpoints keep their direction.
fn clip_segment(
    (x0, y0): (f32, f32),
    (x1, y1): (f32, f32),
    (min_x, min_y, max_x, max_y): (f64, f64, f64, f64),
) -> Option<((f32, f32), (f32, f32))> {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (x0, y0, x1, y1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);
    let (dx, dy) = (x1 - x0, y1 - y0);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [(-dx, x0 - min_x), (dx, max_x - x0), (-dy, y0 - min_y), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        ((x0 + t0 * dx) as f32, (y0 + t0 * dy) as f32),
        ((x0 + t1 * dx) as f32, (y0 + t1 * dy) as f32),
    ))
}

fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let channel = |s: u8, d: u8| -> u8 {
        ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

impl Surface for RasterSurface {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(PathOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push(PathOp::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.path.push(PathOp::ClosePath);
    }

    fn ellipse(
        &mut self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
    ) {
        self.path.push(PathOp::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        let color = self.stroke_color;
        for subpath in self.path.flatten(self.arc_resolution) {
            for (start, end) in subpath.segments() {
                self.stroke_segment(start, end, color);
            }
        }
    }

    fn fill(&mut self) {
        let subpaths = self.path.flatten(self.arc_resolution);
        self.fill_subpaths(&subpaths, self.fill_color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        match parse_color(color) {
            Some(rgba) => self.stroke_color = rgba,
            None => debug!("Ignoring unknown stroke color '{}'", color),
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        match parse_color(color) {
            Some(rgba) => self.fill_color = rgba,
            None => debug!("Ignoring unknown fill color '{}'", color),
        }
    }

    fn set_line_width(&mut self, width: f32) {
        // non-positive and non-finite widths are ignored, as on a canvas
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn put_pixel_buffer(&mut self, buffer: &RgbaImage, x: i32, y: i32) {
        for (bx, by, pixel) in buffer.enumerate_pixels() {
            let (px, py) = (x as i64 + bx as i64, y as i64 + by as i64);
            if self.in_bounds(px, py) {
                self.canvas.put_pixel(px as u32, py as u32, *pixel);
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        for (ix, iy, pixel) in image.enumerate_pixels() {
            self.blend_pixel(x as i64 + ix as i64, y as i64 + iy as i64, *pixel);
        }
    }

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }
}
