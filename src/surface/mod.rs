// src/surface/mod.rs
// The drawing surface abstraction
//
// Every helper in this crate is a thin client of an immediate-mode 2D surface.
// Co-ordinates are surface co-ordinates: origin at the top-left, x to the right,
// y downwards.

pub mod nannou_surface;
pub mod path;
pub mod raster;
pub mod recorder;

pub use nannou_surface::DrawSurface;
pub use path::{PathBuilder, PathOp, Subpath};
pub use raster::RasterSurface;
pub use recorder::{RecordingSurface, SurfaceCommand};

use nannou::image::RgbaImage;

pub const DEFAULT_ARC_RESOLUTION: usize = 64;

pub trait Surface {
    /// Discards the current path and starts a new one
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);

    /// Adds an elliptical arc to the current path. Angles are in radians.
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
    );

    fn stroke(&mut self);
    fn fill(&mut self);

    /// Stroke color for subsequent strokes. Strings the surface does not
    /// understand are ignored.
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f32);

    /// A transparent black RGBA buffer
    fn create_pixel_buffer(&self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }

    /// Replaces surface pixels with the buffer contents, no blending
    fn put_pixel_buffer(&mut self, buffer: &RgbaImage, x: i32, y: i32);

    /// Composites a decoded bitmap over the surface
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn begin_path(&mut self) {
        (**self).begin_path()
    }

    fn move_to(&mut self, x: f32, y: f32) {
        (**self).move_to(x, y)
    }

    fn line_to(&mut self, x: f32, y: f32) {
        (**self).line_to(x, y)
    }

    fn close_path(&mut self) {
        (**self).close_path()
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
        (**self).ellipse(x, y, radius_x, radius_y, rotation, start_angle, end_angle)
    }

    fn stroke(&mut self) {
        (**self).stroke()
    }

    fn fill(&mut self) {
        (**self).fill()
    }

    fn set_stroke_style(&mut self, color: &str) {
        (**self).set_stroke_style(color)
    }

    fn set_fill_style(&mut self, color: &str) {
        (**self).set_fill_style(color)
    }

    fn set_line_width(&mut self, width: f32) {
        (**self).set_line_width(width)
    }

    fn create_pixel_buffer(&self, width: u32, height: u32) -> RgbaImage {
        (**self).create_pixel_buffer(width, height)
    }

    fn put_pixel_buffer(&mut self, buffer: &RgbaImage, x: i32, y: i32) {
        (**self).put_pixel_buffer(buffer, x, y)
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        (**self).draw_image(image, x, y)
    }

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }
}
