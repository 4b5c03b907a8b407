// src/painter/loader.rs
//
// Asynchronous bitmap loading for Image::set_source.
// The loader resolves a URL to a decoded RGBA bitmap. FileLoader handles local
// files on a worker thread so awaiting it never blocks the caller's loop.

use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};
use nannou::image::{self, RgbaImage};
use std::path::PathBuf;
use std::thread;

use crate::errors::{CanvioError, Result};

pub type LoadFuture = BoxFuture<'static, Result<RgbaImage>>;

pub trait ImageLoader {
    /// Starts loading `url`. Dropping the returned future abandons the load.
    fn load(&self, url: &str) -> LoadFuture;
}

/// Loads `file://` URLs and plain filesystem paths
#[derive(Debug, Default, Clone)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(url: &str) -> Result<PathBuf> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }

        match url.split_once("://") {
            Some((scheme, _)) => Err(CanvioError::UnsupportedScheme(scheme.to_string())),
            None => Ok(PathBuf::from(url)),
        }
    }
}

fn decode_file(path: PathBuf) -> Result<RgbaImage> {
    let decoded = image::open(&path)?;
    Ok(decoded.to_rgba8())
}

impl ImageLoader for FileLoader {
    fn load(&self, url: &str) -> LoadFuture {
        let url = url.to_string();
        let path = match Self::resolve(&url) {
            Ok(path) => path,
            Err(e) => return futures::future::ready(Err(CanvioError::load(&url, e))).boxed(),
        };

        let (sender, receiver) = oneshot::channel();
        let thread_url = url.clone();
        thread::spawn(move || {
            debug!("Loading image from {}", path.display());
            let result = decode_file(path).map_err(|e| CanvioError::load(&thread_url, e));
            // the receiver is gone if the caller dropped the load
            if sender.send(result).is_err() {
                debug!("Image load for {} finished after it was abandoned", thread_url);
            }
        });

        async move {
            match receiver.await {
                Ok(result) => result,
                Err(oneshot::Canceled) => {
                    warn!("Image loader for {} exited without a result", url);
                    Err(CanvioError::LoadCancelled)
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::image::Rgba;

    fn temp_png(name: &str, image: &RgbaImage) -> PathBuf {
        let path = std::env::temp_dir().join(format!("canvio_{}_{}.png", name, std::process::id()));
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_resolve_urls() {
        assert_eq!(
            FileLoader::resolve("file:///tmp/a.png").unwrap(),
            PathBuf::from("/tmp/a.png")
        );
        assert_eq!(
            FileLoader::resolve("images/b.png").unwrap(),
            PathBuf::from("images/b.png")
        );
        assert!(matches!(
            FileLoader::resolve("https://example.com/c.png"),
            Err(CanvioError::UnsupportedScheme(scheme)) if scheme == "https"
        ));
    }

    #[test]
    fn test_load_png_from_disk() {
        let source = RgbaImage::from_pixel(3, 2, Rgba([9, 8, 7, 255]));
        let path = temp_png("loader_ok", &source);

        let url = format!("file://{}", path.display());
        let loaded = pollster::block_on(FileLoader::new().load(&url)).unwrap();

        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(*loaded.get_pixel(2, 1), Rgba([9, 8, 7, 255]));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_reports_error() {
        let result = pollster::block_on(FileLoader::new().load("/no/such/canvio/image.png"));
        match result {
            Err(CanvioError::Load { url, .. }) => assert_eq!(url, "/no/such/canvio/image.png"),
            other => panic!("expected a load error, got {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn test_remote_url_is_rejected() {
        let result = pollster::block_on(FileLoader::new().load("http://example.com/x.png"));
        match result {
            Err(CanvioError::Load { source, .. }) => {
                assert!(matches!(*source, CanvioError::UnsupportedScheme(_)))
            }
            other => panic!("expected a load error, got {:?}", other.map(|i| i.dimensions())),
        }
    }
}
