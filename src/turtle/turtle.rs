// src/turtle/turtle.rs
//
// Turtle graphics over a Surface, after Python's turtle module.
// Headings are in degrees from north, increasing clockwise. The turtle starts
// in the middle of the surface facing up with its pen down.

use log::trace;

use crate::models::Position;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    Down,
    Up,
}

pub struct Turtle<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    pen: PenState,
    position: Position,
    heading: f32,
}

// Keeps a heading in [0, 360); rem_euclid can round up to exactly 360.0
fn normalize(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Heading (clockwise from north) to angle from the x axis: y = mod(x + 90, 360) - 180
fn to_x_axis(heading: f32) -> f32 {
    (heading + 90.0).rem_euclid(360.0) - 180.0
}

impl<'a, S: Surface + ?Sized> Turtle<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        let position = Position::new(
            surface.width() as f32 / 2.0,
            surface.height() as f32 / 2.0,
        );

        surface.begin_path();
        surface.move_to(position.x(), position.y());

        Self {
            surface,
            pen: PenState::Down,
            position,
            heading: 0.0,
        }
    }

    /// Movements draw lines from now on
    pub fn pen_down(&mut self) {
        self.pen = PenState::Down;
    }

    /// Movements are invisible from now on
    pub fn pen_up(&mut self) {
        self.pen = PenState::Up;
    }

    pub fn pen_state(&self) -> PenState {
        self.pen
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves `amount` pixels along the current heading. Negative amounts move
    /// backwards. With the pen down the new segment is stroked straight away.
    pub fn forward(&mut self, amount: f32) {
        let angle = to_x_axis(self.heading).to_radians();
        self.position = Position::new(
            self.position.x() + amount * angle.cos(),
            self.position.y() + amount * angle.sin(),
        );
        trace!(
            "Turtle moved to ({}, {}) pen {:?}",
            self.position.x(),
            self.position.y(),
            self.pen
        );

        match self.pen {
            PenState::Down => {
                self.surface.line_to(self.position.x(), self.position.y());
                self.surface.stroke();
            }
            PenState::Up => self.surface.move_to(self.position.x(), self.position.y()),
        }
    }

    pub fn backward(&mut self, amount: f32) {
        self.forward(-amount);
    }

    /// Turns anti-clockwise by `turn` degrees
    pub fn left(&mut self, turn: f32) {
        self.heading = normalize(self.heading + (360.0 - turn));
    }

    /// Turns clockwise by `turn` degrees
    pub fn right(&mut self, turn: f32) {
        self.heading = normalize(self.heading + turn);
    }

    pub fn set_color(&mut self, color: &str) {
        self.surface.set_stroke_style(color);
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.surface.set_line_width(width);
    }

    /// Jumps the drawing cursor to `position` without leaving a trail,
    /// whatever the pen state. The turtle's own position is left as it was,
    /// so the next `forward` continues from the old position's offset.
    pub fn go_to(&mut self, position: Position) {
        self.surface.move_to(position.x(), position.y());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RasterSurface, RecordingSurface, SurfaceCommand};
    use nannou::image::Rgba;

    const EPSILON: f32 = 1e-3;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_starts_centered_facing_north() {
        let mut surface = RecordingSurface::new(200, 100);
        let turtle = Turtle::new(&mut surface);

        assert_eq!(turtle.position(), Position::new(100.0, 50.0));
        assert_eq!(turtle.heading(), 0.0);
        assert_eq!(turtle.pen_state(), PenState::Down);
        drop(turtle);

        assert_eq!(
            surface.commands(),
            &[
                SurfaceCommand::BeginPath,
                SurfaceCommand::MoveTo { x: 100.0, y: 50.0 },
            ]
        );
    }

    #[test]
    fn test_forward_from_north_moves_up() {
        // tx = ((0 + 90) mod 360) - 180 = -90, cos = 0, sin = -1
        let mut surface = RecordingSurface::new(100, 100);
        let mut turtle = Turtle::new(&mut surface);
        turtle.forward(100.0);

        let pos = turtle.position();
        assert!(approx(pos.x(), 50.0), "x was {}", pos.x());
        assert!(approx(pos.y(), -50.0), "y was {}", pos.y());
    }

    #[test]
    fn test_headings_follow_compass() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut turtle = Turtle::new(&mut surface);

        turtle.right(90.0);
        turtle.forward(10.0);
        let east = turtle.position();
        assert!(approx(east.x(), 60.0) && approx(east.y(), 50.0));

        turtle.right(90.0);
        turtle.forward(10.0);
        let south = turtle.position();
        assert!(approx(south.x(), 60.0) && approx(south.y(), 60.0));

        turtle.left(270.0);
        assert!(approx(turtle.heading(), 270.0));
        turtle.forward(10.0);
        let west = turtle.position();
        assert!(approx(west.x(), 50.0) && approx(west.y(), 60.0));
    }

    #[test]
    fn test_backward_is_negative_forward() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut turtle = Turtle::new(&mut surface);
        turtle.right(45.0);
        turtle.forward(20.0);
        turtle.backward(20.0);

        let pos = turtle.position();
        assert!(approx(pos.x(), 50.0) && approx(pos.y(), 50.0));
    }

    #[test]
    fn test_left_then_right_restores_heading() {
        let mut surface = RecordingSurface::new(10, 10);
        let mut turtle = Turtle::new(&mut surface);

        for start in [0.0, 15.0, 90.0, 181.5, 359.0] {
            for turn in [0.0, 1.0, 45.0, 90.0, 200.0, 359.9] {
                turtle.heading = start;
                turtle.left(turn);
                turtle.right(turn);
                let diff = (turtle.heading() - start).abs();
                assert!(
                    diff < EPSILON || (360.0 - diff) < EPSILON,
                    "start {} turn {} ended at {}",
                    start,
                    turn,
                    turtle.heading()
                );
            }
        }
    }

    #[test]
    fn test_heading_stays_normalized() {
        let mut surface = RecordingSurface::new(10, 10);
        let mut turtle = Turtle::new(&mut surface);

        for turn in [-10.0, 720.0, 1000.0, -725.0, 359.999, 0.0001] {
            turtle.right(turn);
            assert!((0.0..360.0).contains(&turtle.heading()));
            turtle.left(turn);
            assert!((0.0..360.0).contains(&turtle.heading()));
        }

        turtle.heading = 0.0;
        turtle.right(-10.0);
        assert!(approx(turtle.heading(), 350.0));
        turtle.left(-20.0);
        assert!(approx(turtle.heading(), 10.0));
    }

    #[test]
    fn test_pen_down_strokes_each_move() {
        let mut surface = RecordingSurface::new(100, 100);
        {
            let mut turtle = Turtle::new(&mut surface);
            turtle.forward(10.0);
            turtle.pen_up();
            turtle.forward(10.0);
            turtle.pen_down();
            turtle.forward(10.0);
        }

        let commands = &surface.commands()[2..];
        assert!(matches!(commands[0], SurfaceCommand::LineTo { .. }));
        assert_eq!(commands[1], SurfaceCommand::Stroke);
        assert!(matches!(commands[2], SurfaceCommand::MoveTo { .. }));
        assert!(matches!(commands[3], SurfaceCommand::LineTo { .. }));
        assert_eq!(commands[4], SurfaceCommand::Stroke);
        assert_eq!(surface.count(|c| *c == SurfaceCommand::Stroke), 2);
    }

    #[test]
    fn test_go_to_ignores_pen() {
        let mut surface = RecordingSurface::new(100, 100);
        {
            let mut turtle = Turtle::new(&mut surface);
            assert_eq!(turtle.pen_state(), PenState::Down);
            turtle.go_to(Position::new(5.0, 7.0));
            // the tracked position does not follow the jump
            assert_eq!(turtle.position(), Position::new(50.0, 50.0));
        }

        assert_eq!(
            surface.commands().last(),
            Some(&SurfaceCommand::MoveTo { x: 5.0, y: 7.0 })
        );
        assert_eq!(surface.count(|c| *c == SurfaceCommand::Stroke), 0);
        assert_eq!(
            surface.count(|c| matches!(c, SurfaceCommand::LineTo { .. })),
            0
        );

        // the next step is measured from the old position, not the jump target
        {
            let mut turtle = Turtle::new(&mut surface);
            turtle.go_to(Position::new(5.0, 7.0));
            turtle.forward(10.0);
            assert!(turtle.position().distance_to(Position::new(50.0, 40.0)) < EPSILON);
        }
        let last_line = surface
            .commands()
            .iter()
            .rev()
            .find_map(|c| match *c {
                SurfaceCommand::LineTo { x, y } => Some((x, y)),
                _ => None,
            });
        let (x, y) = last_line.unwrap();
        assert!((x - 50.0).abs() < EPSILON);
        assert!((y - 40.0).abs() < EPSILON);
        assert_eq!(surface.count(|c| *c == SurfaceCommand::Stroke), 1);
    }

    #[test]
    fn test_style_forwarded_to_surface() {
        let mut surface = RecordingSurface::new(100, 100);
        {
            let mut turtle = Turtle::new(&mut surface);
            turtle.set_color("crimson");
            turtle.set_line_width(3.5);
        }

        assert_eq!(surface.stroke_style(), "crimson");
        assert_eq!(surface.line_width(), 3.5);
    }

    #[test]
    fn test_draws_square_on_raster() {
        let mut surface = RasterSurface::new(40, 40);
        {
            let mut turtle = Turtle::new(&mut surface);
            turtle.set_color("red");
            for _ in 0..4 {
                turtle.forward(10.0);
                turtle.right(90.0);
            }
        }

        let red = Some(Rgba([255, 0, 0, 255]));
        // north edge runs from (20, 20) up to (20, 10)
        assert_eq!(surface.pixel(20, 15), red);
        // east edge along y = 10
        assert_eq!(surface.pixel(25, 10), red);
        assert_eq!(surface.pixel(25, 15), Some(Rgba([0, 0, 0, 0])));
    }
}
