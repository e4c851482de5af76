//! Text overlay: rasterize a caption and composite it onto the image.
//!
//! ## Anchoring
//!
//! Two conventions are supported through [`TextAnchor`]:
//!
//! - **TopLeftClamped** (default): `position` is the top-left of the text's
//!   ink box. If the text would run past the right or bottom edge it is
//!   shifted back so it ends exactly on that edge. Text larger than the
//!   image ends up with a negative origin and clips at the far side.
//! - **Centered**: `position` is the centre of the ink box. No clamping.
//!
//! Glyphs are drawn in an opaque color onto a transparent layer and blended
//! with the same "over" operator the sticker compositor uses.

mod builtin;
mod typeface;

pub use typeface::{Typeface, TypefaceError};

use serde::{Deserialize, Serialize};

use crate::composite::blend_over;
use crate::raster::Raster;

/// Largest font size in pixels. Larger requests are drawn at this size.
pub const MAX_TEXT_SIZE: u32 = 512;

/// Text parameters for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSpec {
    /// The caption. Empty means nothing is drawn.
    pub content: String,
    /// Typeface catalog name; `None` selects the default typeface.
    pub typeface: Option<String>,
    /// Font size in pixels.
    pub size: u32,
    /// Opaque text color.
    pub color: [u8; 3],
    /// Anchor point in base-image pixels.
    pub position: (i32, i32),
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            content: String::new(),
            typeface: None,
            size: 40,
            color: [255, 255, 255],
            position: (50, 50),
        }
    }
}

impl TextSpec {
    pub fn new(
        content: impl Into<String>,
        size: u32,
        color: [u8; 3],
        position: (i32, i32),
    ) -> Self {
        Self {
            content: content.into(),
            typeface: None,
            size,
            color,
            position,
        }
    }

    pub fn with_typeface(mut self, name: impl Into<String>) -> Self {
        self.typeface = Some(name.into());
        self
    }

    /// Copy with `size` capped at [`MAX_TEXT_SIZE`].
    pub fn clamped(&self) -> Self {
        Self {
            size: self.size.min(MAX_TEXT_SIZE),
            ..self.clone()
        }
    }
}

/// How `TextSpec::position` relates to the drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAnchor {
    #[default]
    TopLeftClamped,
    Centered,
}

/// Single-channel coverage mask produced by a typeface (255 = solid ink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            self.coverage[y as usize * self.width as usize + x as usize] = value;
        }
    }

    /// Keep the stronger of the existing and new coverage.
    #[inline]
    pub(crate) fn set_max(&mut self, x: u32, y: u32, value: u8) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.coverage[idx] = self.coverage[idx].max(value);
        }
    }
}

/// Top-left corner at which a `width` x `height` text box is drawn.
pub fn text_origin(
    anchor: TextAnchor,
    position: (i32, i32),
    text_size: (u32, u32),
    image_size: (u32, u32),
) -> (i32, i32) {
    let (x, y) = (position.0 as i64, position.1 as i64);
    let (w, h) = (text_size.0 as i64, text_size.1 as i64);
    let (img_w, img_h) = (image_size.0 as i64, image_size.1 as i64);

    let (ox, oy) = match anchor {
        TextAnchor::TopLeftClamped => {
            let ox = if x + w > img_w { img_w - w } else { x };
            let oy = if y + h > img_h { img_h - h } else { y };
            (ox, oy)
        }
        TextAnchor::Centered => (x - w / 2, y - h / 2),
    };
    (saturate_i32(ox), saturate_i32(oy))
}

fn saturate_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Draw `text` onto `image` and return the RGBA result.
///
/// Pixels that fall outside the image are clipped.
pub fn draw_text(
    image: &Raster,
    text: &TextSpec,
    typeface: &Typeface,
    anchor: TextAnchor,
) -> Raster {
    let mut out = image.to_rgba();
    if text.content.is_empty() {
        return out;
    }

    let mask = typeface.rasterize(&text.content, text.size.min(MAX_TEXT_SIZE));
    if mask.width == 0 || mask.height == 0 {
        return out;
    }

    let (ox, oy) = text_origin(
        anchor,
        text.position,
        (mask.width, mask.height),
        (out.width, out.height),
    );
    let [r, g, b] = text.color;

    for my in 0..mask.height {
        let y = oy as i64 + my as i64;
        if y < 0 || y >= out.height as i64 {
            continue;
        }
        for mx in 0..mask.width {
            let x = ox as i64 + mx as i64;
            if x < 0 || x >= out.width as i64 {
                continue;
            }
            let cov = mask.get(mx, my);
            if cov == 0 {
                continue;
            }
            let idx = (y as usize * out.width as usize + x as usize) * 4;
            let dst = [
                out.pixels[idx],
                out.pixels[idx + 1],
                out.pixels[idx + 2],
                out.pixels[idx + 3],
            ];
            out.pixels[idx..idx + 4].copy_from_slice(&blend_over(dst, [r, g, b, cov]));
        }
    }
    out
}
