// src/painter/image.rs
//
// Image: a pixel buffer bound to a surface.
// Paints procedural patterns pixel-by-pixel from per-channel functions, or
// replaces itself with a bitmap loaded from a URL.

use log::{debug, info, warn};
use nannou::image::RgbaImage;

use super::loader::{FileLoader, ImageLoader};
use crate::errors::{CanvioError, Result};
use crate::surface::Surface;

// Everything that only exists after init()
struct Bound<'a, S: ?Sized> {
    surface: &'a mut S,
    width: u32,
    height: u32,
    pixels: RgbaImage,
}

pub struct Image<'a, S: Surface + ?Sized> {
    bound: Option<Bound<'a, S>>,
    loader: Box<dyn ImageLoader + 'a>,
}

impl<'a, S: Surface + ?Sized> Default for Image<'a, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: Surface + ?Sized> Image<'a, S> {
    /// An image that is not yet bound to a surface. Sources load through
    /// `FileLoader`.
    pub fn new() -> Self {
        Self::with_loader(FileLoader::new())
    }

    pub fn with_loader<L: ImageLoader + 'a>(loader: L) -> Self {
        Self {
            bound: None,
            loader: Box::new(loader),
        }
    }

    /// Binds the surface and allocates a zeroed `width` x `height` buffer.
    /// Calling it again rebinds and starts over with a fresh buffer.
    pub fn init(&mut self, surface: &'a mut S, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(CanvioError::InvalidDimensions { width, height });
        }

        let pixels = surface.create_pixel_buffer(width, height);
        self.bound = Some(Bound {
            surface,
            width,
            height,
            pixels,
        });
        debug!("Image initialised at {}x{}", width, height);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.bound.is_some()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.bound.as_ref().map(|b| (b.width, b.height))
    }

    /// The raw RGBA bytes, row-major, four per pixel
    pub fn pixels(&self) -> Result<&[u8]> {
        self.bound
            .as_ref()
            .map(|b| b.pixels.as_raw().as_slice())
            .ok_or(CanvioError::Uninitialized)
    }

    /// Fills the buffer from per-channel functions of `(x, y)` and paints the
    /// whole buffer onto the surface at the origin.
    ///
    /// Pixels are visited row by row from the top-left; for each one the
    /// channel functions run in red, green, blue, alpha order.
    pub fn set_pattern<R, G, B, A>(
        &mut self,
        mut red: R,
        mut green: G,
        mut blue: B,
        mut alpha: A,
    ) -> Result<()>
    where
        R: FnMut(u32, u32) -> u8,
        G: FnMut(u32, u32) -> u8,
        B: FnMut(u32, u32) -> u8,
        A: FnMut(u32, u32) -> u8,
    {
        let bound = self.bound.as_mut().ok_or(CanvioError::Uninitialized)?;
        let (width, height) = (bound.width, bound.height);
        let raw: &mut [u8] = &mut bound.pixels;

        for y in 0..height {
            for x in 0..width {
                let index = (y as usize * width as usize + x as usize) * 4;
                let pixel = [red(x, y), green(x, y), blue(x, y), alpha(x, y)];
                raw[index..index + 4].copy_from_slice(&pixel);
            }
        }

        bound.surface.put_pixel_buffer(&bound.pixels, 0, 0);
        debug!("Painted {}x{} pattern", bound.width, bound.height);
        Ok(())
    }

    /// Loads a bitmap from `url` and draws it at the surface origin once it
    /// arrives. The pixel buffer is replaced by the bitmap, cropped or padded
    /// with transparent black to the image size.
    ///
    /// Nothing is painted if the load fails; the error is returned instead.
    pub async fn set_source(&mut self, url: &str) -> Result<()> {
        if self.bound.is_none() {
            return Err(CanvioError::Uninitialized);
        }

        let bitmap = match self.loader.load(url).await {
            Ok(bitmap) => bitmap,
            Err(e) => {
                warn!("Could not load image source {}: {}", url, e);
                return Err(e);
            }
        };

        let bound = self.bound.as_mut().ok_or(CanvioError::Uninitialized)?;
        bound.surface.draw_image(&bitmap, 0, 0);

        let mut pixels = bound.surface.create_pixel_buffer(bound.width, bound.height);
        for (x, y, pixel) in bitmap.enumerate_pixels() {
            if x < bound.width && y < bound.height {
                pixels.put_pixel(x, y, *pixel);
            }
        }
        bound.pixels = pixels;

        info!(
            "Loaded {}x{} image from {}",
            bitmap.width(),
            bitmap.height(),
            url
        );
        Ok(())
    }
}
