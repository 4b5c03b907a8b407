// src/errors.rs
//
// Error type shared by the painter and the image loaders

use nannou::image::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvioError {
    #[error("init() not called on new canvio Image")]
    Uninitialized,

    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unsupported image source scheme: {0}")]
    UnsupportedScheme(String),

    #[error("failed to load image from {url}")]
    Load {
        url: String,
        #[source]
        source: Box<CanvioError>,
    },

    #[error("image load was cancelled before it completed")]
    LoadCancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] ImageError),
}

pub type Result<T> = std::result::Result<T, CanvioError>;

impl CanvioError {
    pub(crate) fn load(url: &str, source: CanvioError) -> Self {
        CanvioError::Load {
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_keeps_source() {
        let err = CanvioError::load("missing.png", CanvioError::LoadCancelled);
        assert_eq!(err.to_string(), "failed to load image from missing.png");

        let source = std::error::Error::source(&err).expect("source should be set");
        assert_eq!(
            source.to_string(),
            "image load was cancelled before it completed"
        );
    }
}
