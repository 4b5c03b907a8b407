// src/draw/mod.rs
// Stateless drawing helpers over a Surface

pub mod primitives;

pub use primitives::{draw_circle, draw_line, fill, set_fill_color, set_outline_color, stroke};
