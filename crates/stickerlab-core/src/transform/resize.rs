//! Sticker resizing.
//!
//! Resampling happens in premultiplied alpha so transparent pixels don't
//! bleed their (usually black) color into the visible edge of a sticker.

use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// Filter type for resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Dimensions after scaling by `factor`, truncated toward zero, never below 1x1.
pub fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let w = (width as f64 * factor as f64) as u32;
    let h = (height as f64 * factor as f64) as u32;
    (w.max(1), h.max(1))
}

/// Resize a raster to exact dimensions. The result is always RGBA.
pub fn resize_raster(image: &Raster, width: u32, height: u32, filter: FilterType) -> Raster {
    let width = width.max(1);
    let height = height.max(1);

    // Fast path: if dimensions match, just convert
    if image.width == width && image.height == height {
        return image.to_rgba();
    }

    let mut premultiplied = image.to_rgba();
    premultiply(&mut premultiplied.pixels);

    let src = image::RgbaImage::from_raw(
        premultiplied.width,
        premultiplied.height,
        premultiplied.pixels,
    );
    let mut out = match src {
        Some(src) => Raster::from_rgba_image(image::imageops::resize(
            &src,
            width,
            height,
            filter.to_image_filter(),
        )),
        None => return Raster::transparent(width, height),
    };
    unpremultiply(&mut out.pixels);
    out
}

/// Scale a raster by a uniform factor.
pub fn scale_raster(image: &Raster, factor: f32, filter: FilterType) -> Raster {
    let (w, h) = scaled_dimensions(image.width, image.height, factor);
    resize_raster(image, w, h, filter)
}

/// Multiply RGB by alpha in place (RGBA buffer).
pub(crate) fn premultiply(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * a + 127) / 255) as u8;
        }
    }
}

/// Divide RGB by alpha in place (RGBA buffer).
pub(crate) fn unpremultiply(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
