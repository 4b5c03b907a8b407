// src/models/position.rs
// A co-ordinate on the drawing surface
//
// Surface co-ordinates start at (0, 0) in the top-left corner. X increases to the
// right and Y increases downwards.

use nannou::geom::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between this point and `other`
    pub fn distance_to(&self, other: Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn distance_to_origin(&self) -> f32 {
        self.distance_to(Position::ORIGIN)
    }
}

impl From<(f32, f32)> for Position {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for Vec2 {
    fn from(p: Position) -> Self {
        Vec2::new(p.x, p.y)
    }
}
