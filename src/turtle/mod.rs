#[allow(clippy::module_inception)]
pub mod turtle;

pub use turtle::{PenState, Turtle};
