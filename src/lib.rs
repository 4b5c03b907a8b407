// src/lib.rs
//
// canvio: simple helpers over a 2D drawing surface.
// Line and circle drawing, color setters, positions with distance helpers,
// a pixel-buffer image painter and turtle graphics.

pub mod config;
pub mod draw;
pub mod errors;
pub mod models;
pub mod painter;
pub mod surface;
pub mod turtle;

pub use errors::{CanvioError, Result};
pub use models::Position;
pub use painter::Image;
pub use surface::Surface;
pub use turtle::{PenState, Turtle};
