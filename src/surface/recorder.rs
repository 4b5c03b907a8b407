// src/surface/recorder.rs
//
// A surface that draws nothing and remembers everything.
// Useful for headless inspection of what a helper asked the surface to do.

use nannou::image::RgbaImage;

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    BeginPath,
    MoveTo {
        x: f32,
        y: f32,
    },
    LineTo {
        x: f32,
        y: f32,
    },
    ClosePath,
    Ellipse {
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Stroke,
    Fill,
    SetStrokeStyle(String),
    SetFillStyle(String),
    SetLineWidth(f32),
    PutPixelBuffer {
        width: u32,
        height: u32,
        x: i32,
        y: i32,
    },
    DrawImage {
        width: u32,
        height: u32,
        x: i32,
        y: i32,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<SurfaceCommand>,
    stroke_style: String,
    fill_style: String,
    line_width: f32,
    last_pixel_buffer: Option<RgbaImage>,
    last_image: Option<RgbaImage>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            stroke_style: "#000000".to_string(),
            fill_style: "#000000".to_string(),
            line_width: 1.0,
            last_pixel_buffer: None,
            last_image: None,
        }
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn stroke_style(&self) -> &str {
        &self.stroke_style
    }

    pub fn fill_style(&self) -> &str {
        &self.fill_style
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// The buffer passed to the most recent `put_pixel_buffer`
    pub fn last_pixel_buffer(&self) -> Option<&RgbaImage> {
        self.last_pixel_buffer.as_ref()
    }

    /// The bitmap passed to the most recent `draw_image`
    pub fn last_image(&self) -> Option<&RgbaImage> {
        self.last_image.as_ref()
    }

    pub fn count(&self, matches: impl Fn(&SurfaceCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| matches(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.commands.push(SurfaceCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(SurfaceCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(SurfaceCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(SurfaceCommand::ClosePath);
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
        self.commands.push(SurfaceCommand::Ellipse {
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
        self.commands.push(SurfaceCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(SurfaceCommand::Fill);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.stroke_style = color.to_string();
        self.commands
            .push(SurfaceCommand::SetStrokeStyle(color.to_string()));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill_style = color.to_string();
        self.commands.push(SurfaceCommand::SetFillStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.commands.push(SurfaceCommand::SetLineWidth(width));
    }

    fn put_pixel_buffer(&mut self, buffer: &RgbaImage, x: i32, y: i32) {
        self.commands.push(SurfaceCommand::PutPixelBuffer {
            width: buffer.width(),
            height: buffer.height(),
            x,
            y,
        });
        self.last_pixel_buffer = Some(buffer.clone());
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        self.commands.push(SurfaceCommand::DrawImage {
            width: image.width(),
            height: image.height(),
            x,
            y,
        });
        self.last_image = Some(image.clone());
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
