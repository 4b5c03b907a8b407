// src/draw/primitives.rs
//
// One-call helpers that forward straight to the surface.
// None of them stroke or fill unless their name says so.

use std::f32::consts::PI;

use crate::models::Position;
use crate::surface::Surface;

/// Replaces the current path with a closed line from `start` to `end`
pub fn draw_line<S: Surface + ?Sized>(surface: &mut S, start: Position, end: Position) {
    surface.begin_path();
    surface.move_to(start.x(), start.y());
    surface.line_to(end.x(), end.y());
    surface.close_path();
}

/// Color for future outlines. Hex codes or color names; the surface decides
/// what to do with anything else.
pub fn set_outline_color<S: Surface + ?Sized>(surface: &mut S, color: &str) {
    surface.set_stroke_style(color);
}

pub fn set_fill_color<S: Surface + ?Sized>(surface: &mut S, color: &str) {
    surface.set_fill_style(color);
}

/// Adds a full circle to the current path
pub fn draw_circle<S: Surface + ?Sized>(surface: &mut S, center: Position, radius: f32) {
    surface.ellipse(center.x(), center.y(), radius, radius, 0.0, 0.0, 2.0 * PI);
}

pub fn stroke<S: Surface + ?Sized>(surface: &mut S) {
    surface.stroke();
}

pub fn fill<S: Surface + ?Sized>(surface: &mut S) {
    surface.fill();
}
