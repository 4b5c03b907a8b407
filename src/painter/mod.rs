pub mod image;
pub mod loader;

pub use self::image::Image;
pub use loader::{FileLoader, ImageLoader, LoadFuture};
