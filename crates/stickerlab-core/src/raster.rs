//! The pixel container shared by every pipeline stage.
//!
//! A [`Raster`] is a row-major byte buffer with an explicit [`ColorMode`].
//! Stages never mutate their input: each one returns a new `Raster`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a raster from raw parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// Pixel buffer length doesn't match `width * height * channels`.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Channel layout of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Opaque RGB, 3 bytes per pixel.
    Rgb,
    /// RGB with straight (non-premultiplied) alpha, 4 bytes per pixel.
    #[default]
    Rgba,
}

impl ColorMode {
    /// Bytes per pixel for this mode.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, ColorMode::Rgba)
    }
}

/// A rectangular grid of pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub mode: ColorMode,
    /// Pixel data in row-major order.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster, validating the buffer length against the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        mode: ColorMode,
        pixels: Vec<u8>,
    ) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * mode.channels();
        if pixels.len() != expected {
            return Err(RasterError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            pixels,
        })
    }

    /// Internal constructor for buffers whose length is correct by construction.
    pub(crate) fn from_rgba_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            mode: ColorMode::Rgba,
            pixels,
        }
    }

    /// A raster filled with a single RGB color.
    pub fn filled_rgb(width: u32, height: u32, color: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            mode: ColorMode::Rgb,
            pixels: color.repeat(count),
        }
    }

    /// A raster filled with a single RGBA color.
    pub fn filled_rgba(width: u32, height: u32, color: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            mode: ColorMode::Rgba,
            pixels: color.repeat(count),
        }
    }

    /// A fully transparent RGBA raster.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::filled_rgba(width, height, [0, 0, 0, 0])
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Rgb,
            pixels: img.into_raw(),
        }
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Rgba,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage`, adding opaque alpha if needed.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        let rgba = self.to_rgba();
        image::RgbaImage::from_raw(rgba.width, rgba.height, rgba.pixels)
    }

    /// Return an RGBA copy. RGB input gains alpha 255 on every pixel.
    pub fn to_rgba(&self) -> Raster {
        match self.mode {
            ColorMode::Rgba => self.clone(),
            ColorMode::Rgb => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.pixels.chunks_exact(3) {
                    pixels.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                Raster {
                    width: self.width,
                    height: self.height,
                    mode: ColorMode::Rgba,
                    pixels,
                }
            }
        }
    }

    /// Return an opaque RGB copy. Alpha, if any, is dropped.
    pub fn to_rgb(&self) -> Raster {
        match self.mode {
            ColorMode::Rgb => self.clone(),
            ColorMode::Rgba => {
                let mut pixels = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.pixels.chunks_exact(4) {
                    pixels.extend_from_slice(&px[..3]);
                }
                Raster {
                    width: self.width,
                    height: self.height,
                    mode: ColorMode::Rgb,
                    pixels,
                }
            }
        }
    }

    /// Pixel at `(x, y)` as RGBA. Returns `None` outside the raster.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let ch = self.mode.channels();
        let idx = (y as usize * self.width as usize + x as usize) * ch;
        let px = &self.pixels[idx..idx + ch];
        Some(match self.mode {
            ColorMode::Rgb => [px[0], px[1], px[2], 255],
            ColorMode::Rgba => [px[0], px[1], px[2], px[3]],
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Number of pixels whose alpha is above `threshold`.
    pub fn count_opaque(&self, threshold: u8) -> usize {
        match self.mode {
            ColorMode::Rgb => self.pixel_count(),
            ColorMode::Rgba => self
                .pixels
                .chunks_exact(4)
                .filter(|px| px[3] > threshold)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        let ok = Raster::new(2, 2, ColorMode::Rgb, vec![0; 12]);
        assert!(ok.is_ok());

        let err = Raster::new(2, 2, ColorMode::Rgba, vec![0; 12]).unwrap_err();
        assert_eq!(
            err,
            RasterError::InvalidPixelData {
                expected: 16,
                actual: 12
            }
        );
    }

    #[test]
    fn test_raster_error_display() {
        let err = RasterError::InvalidPixelData {
            expected: 16,
            actual: 12,
        };
        assert_eq!(err.to_string(), "Invalid pixel data: expected 16 bytes, got 12");
    }

    #[test]
    fn test_to_rgba_adds_opaque_alpha() {
        let rgb = Raster::filled_rgb(2, 1, [10, 20, 30]);
        let rgba = rgb.to_rgba();
        assert_eq!(rgba.mode, ColorMode::Rgba);
        assert_eq!(rgba.pixels, vec![10, 20, 30, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn test_to_rgb_drops_alpha() {
        let rgba = Raster::filled_rgba(1, 2, [1, 2, 3, 4]);
        let rgb = rgba.to_rgb();
        assert_eq!(rgb.mode, ColorMode::Rgb);
        assert_eq!(rgb.pixels, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_get_rgba_bounds() {
        let img = Raster::filled_rgb(3, 2, [9, 8, 7]);
        assert_eq!(img.get_rgba(2, 1), Some([9, 8, 7, 255]));
        assert_eq!(img.get_rgba(3, 0), None);
        assert_eq!(img.get_rgba(0, 2), None);
    }

    #[test]
    fn test_image_crate_round_trip() {
        let img = Raster::filled_rgba(4, 3, [200, 100, 50, 128]);
        let converted = img.to_rgba_image().unwrap();
        assert_eq!(converted.dimensions(), (4, 3));
        assert_eq!(Raster::from_rgba_image(converted), img);
    }

    #[test]
    fn test_count_opaque() {
        let mut img = Raster::transparent(2, 2);
        img.pixels[3] = 255;
        img.pixels[7] = 10;
        assert_eq!(img.count_opaque(0), 2);
        assert_eq!(img.count_opaque(127), 1);
        assert_eq!(Raster::filled_rgb(2, 2, [0, 0, 0]).count_opaque(0), 4);
    }

    #[test]
    fn test_empty() {
        assert!(Raster::transparent(0, 5).is_empty());
        assert!(!Raster::transparent(1, 1).is_empty());
    }
}
