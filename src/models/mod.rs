pub mod color;
pub mod position;

pub use color::parse_color;
pub use position::Position;
