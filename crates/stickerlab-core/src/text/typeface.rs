//! Typefaces: outline fonts loaded from files, or the embedded bitmap font.

use std::path::Path;

use ab_glyph::{point, Font, FontArc, GlyphId, ScaleFont};
use thiserror::Error;

use super::{builtin, GlyphMask, MAX_TEXT_SIZE};

/// Errors raised while loading a typeface.
#[derive(Debug, Error)]
pub enum TypefaceError {
    /// The font file does not exist.
    #[error("Typeface file not found: {0}")]
    Missing(String),

    /// The font file exists but could not be read.
    #[error("I/O error reading typeface {path}: {reason}")]
    Io { path: String, reason: String },

    /// The bytes are not a usable TrueType/OpenType font.
    #[error("Invalid typeface data: {0}")]
    Invalid(String),
}

/// A font that can measure and rasterize a single line of text.
#[derive(Debug, Clone, Default)]
pub enum Typeface {
    /// A TrueType/OpenType font.
    Outline(FontArc),
    /// The embedded 5x7 bitmap font.
    #[default]
    Builtin,
}

impl Typeface {
    /// Parse font bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, TypefaceError> {
        FontArc::try_from_vec(bytes)
            .map(Typeface::Outline)
            .map_err(|e| TypefaceError::Invalid(e.to_string()))
    }

    /// Read and parse a font file.
    pub fn from_file(path: &Path) -> Result<Self, TypefaceError> {
        if !path.exists() {
            return Err(TypefaceError::Missing(path.display().to_string()));
        }
        let bytes = std::fs::read(path).map_err(|e| TypefaceError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(bytes)
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    /// Pixel size of the ink box of `content`. `size` is capped at [`MAX_TEXT_SIZE`].
    pub fn measure(&self, content: &str, size: u32) -> (u32, u32) {
        let size = size.min(MAX_TEXT_SIZE);
        match self {
            Typeface::Builtin => builtin::measure(content, size),
            Typeface::Outline(_) => {
                let mask = self.rasterize(content, size);
                (mask.width, mask.height)
            }
        }
    }

    /// Rasterize `content` into a coverage mask cropped to its ink box.
    pub fn rasterize(&self, content: &str, size: u32) -> GlyphMask {
        let size = size.min(MAX_TEXT_SIZE);
        match self {
            Typeface::Builtin => builtin::rasterize(content, size),
            Typeface::Outline(font) => rasterize_outline(font, content, size as f32),
        }
    }
}

/// Lay out one line at the baseline and draw every outlined glyph.
fn rasterize_outline(font: &FontArc, content: &str, font_size: f32) -> GlyphMask {
    if content.is_empty() || font_size <= 0.0 {
        return GlyphMask::empty(0, 0);
    }

    let scaled = font.as_scaled(font_size);
    let ascent = scaled.ascent();

    let mut caret = 0.0f32;
    let mut last_glyph: Option<GlyphId> = None;
    let mut outlined = Vec::new();

    for ch in content.chars().filter(|c| !c.is_control()) {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = last_glyph {
            caret += scaled.kern(prev, glyph_id);
        }
        let glyph = glyph_id.with_scale_and_position(font_size, point(caret, ascent));
        caret += scaled.h_advance(glyph_id);
        last_glyph = Some(glyph_id);

        if let Some(o) = font.outline_glyph(glyph) {
            outlined.push(o);
        }
    }

    // Nothing but whitespace: report the advance box with no ink
    if outlined.is_empty() {
        let width = caret.ceil().max(0.0) as u32;
        let height = (ascent - scaled.descent()).ceil().max(0.0) as u32;
        return GlyphMask::empty(width, height);
    }

    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for o in &outlined {
        let b = o.px_bounds();
        min_x = min_x.min(b.min.x);
        min_y = min_y.min(b.min.y);
        max_x = max_x.max(b.max.x);
        max_y = max_y.max(b.max.y);
    }

    let origin_x = min_x.floor() as i32;
    let origin_y = min_y.floor() as i32;
    let width = (max_x.ceil() as i32 - origin_x).max(0) as u32;
    let height = (max_y.ceil() as i32 - origin_y).max(0) as u32;
    let mut mask = GlyphMask::empty(width, height);

    for o in &outlined {
        let b = o.px_bounds();
        let gx = b.min.x as i32 - origin_x;
        let gy = b.min.y as i32 - origin_y;
        o.draw(|px, py, cov| {
            let x = gx + px as i32;
            let y = gy + py as i32;
            if x < 0 || y < 0 {
                return;
            }
            let value = (cov.clamp(0.0, 1.0) * 255.0).round() as u8;
            mask.set_max(x as u32, y as u32, value);
        });
    }
    mask
}
