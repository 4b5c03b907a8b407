// src/surface/nannou_surface.rs
//
// Adapts a nannou Draw to the Surface trait.
// nannou puts the origin at the window centre with y pointing up, so every
// point is converted from top-left surface co-ordinates before drawing.

use log::debug;
use nannou::color::{rgba, Srgba};
use nannou::image::{DynamicImage, Rgba, RgbaImage};
use nannou::prelude::*;

use super::path::{PathBuilder, PathOp};
use super::{Surface, DEFAULT_ARC_RESOLUTION};
use crate::models::parse_color;

pub struct DrawSurface<'a> {
    app: &'a App,
    draw: &'a Draw,
    width: u32,
    height: u32,
    path: PathBuilder,
    stroke_color: Rgba<u8>,
    fill_color: Rgba<u8>,
    line_width: f32,
    arc_resolution: usize,
}

impl<'a> DrawSurface<'a> {
    pub fn new(app: &'a App, draw: &'a Draw, width: u32, height: u32) -> Self {
        Self {
            app,
            draw,
            width,
            height,
            path: PathBuilder::new(),
            stroke_color: Rgba([0, 0, 0, 255]),
            fill_color: Rgba([0, 0, 0, 255]),
            line_width: 1.0,
            arc_resolution: DEFAULT_ARC_RESOLUTION,
        }
    }

    pub fn with_arc_resolution(mut self, arc_resolution: usize) -> Self {
        self.arc_resolution = arc_resolution;
        self
    }

    // top-left, y-down surface point to nannou's centred, y-up space
    fn to_nannou(&self, (x, y): (f32, f32)) -> Point2 {
        pt2(
            x - self.width as f32 / 2.0,
            self.height as f32 / 2.0 - y,
        )
    }

    // `replace` writes the texels as they are, alpha included, instead of
    // compositing them over the frame
    fn draw_bitmap(&self, image: &RgbaImage, x: i32, y: i32, replace: bool) {
        let (w, h) = (image.width() as f32, image.height() as f32);
        let texture = wgpu::Texture::from_image(self.app, &DynamicImage::ImageRgba8(image.clone()));
        let center = self.to_nannou((x as f32 + w / 2.0, y as f32 + h / 2.0));

        if replace {
            self.draw
                .color_blend(wgpu::BlendComponent::REPLACE)
                .alpha_blend(wgpu::BlendComponent::REPLACE)
                .texture(&texture)
                .x_y(center.x, center.y)
                .w_h(w, h);
        } else {
            self.draw.texture(&texture).x_y(center.x, center.y).w_h(w, h);
        }
    }
}

fn to_color(pixel: Rgba<u8>) -> Srgba<f32> {
    rgba(
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
        pixel[3] as f32 / 255.0,
    )
}

impl Surface for DrawSurface<'_> {
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
        let color = to_color(self.stroke_color);
        for subpath in self.path.flatten(self.arc_resolution) {
            for (start, end) in subpath.segments() {
                self.draw
                    .line()
                    .start(self.to_nannou(start))
                    .end(self.to_nannou(end))
                    .stroke_weight(self.line_width)
                    .color(color)
                    .caps_round();
            }
        }
    }

    fn fill(&mut self) {
        let color = to_color(self.fill_color);
        for subpath in self.path.flatten(self.arc_resolution) {
            if subpath.points.len() < 3 {
                continue;
            }
            let points: Vec<Point2> = subpath.points.iter().map(|p| self.to_nannou(*p)).collect();
            self.draw.polygon().color(color).points(points);
        }
    }

    fn set_stroke_style(&mut self, color: &str) {
        match parse_color(color) {
            Some(parsed) => self.stroke_color = parsed,
            None => debug!("Ignoring unknown stroke color '{}'", color),
        }
    }

    fn set_fill_style(&mut self, color: &str) {
        match parse_color(color) {
            Some(parsed) => self.fill_color = parsed,
            None => debug!("Ignoring unknown fill color '{}'", color),
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn put_pixel_buffer(&mut self, buffer: &RgbaImage, x: i32, y: i32) {
        self.draw_bitmap(buffer, x, y, true);
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        self.draw_bitmap(image, x, y, false);
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
