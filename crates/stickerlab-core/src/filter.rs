//! Color filters applied to the base photo.
//!
//! Filters only touch the RGB channels. When the input carries alpha, the
//! alpha bytes pass through untouched so the output keeps the input's mode.
//!
//! ## Filters
//! - Original: identity
//! - Brighten: every channel × 1.1, fraction truncated
//! - Cool: blue + 20
//! - Warm: red + 20
//! - Grayscale: BT.601 luma copied into all three channels

use serde::{Deserialize, Serialize};

use crate::luminance::luma_u8;
use crate::raster::Raster;

/// Multiplier applied by [`FilterSelector::Brighten`].
pub const BRIGHTEN_FACTOR: f32 = 1.1;

/// Channel offset applied by [`FilterSelector::Cool`] and [`FilterSelector::Warm`].
pub const TINT_OFFSET: u8 = 20;

/// The closed set of filters a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterSelector {
    #[default]
    Original,
    Brighten,
    Cool,
    Warm,
    Grayscale,
}

impl FilterSelector {
    /// All filters in display order.
    pub const ALL: [FilterSelector; 5] = [
        FilterSelector::Original,
        FilterSelector::Brighten,
        FilterSelector::Cool,
        FilterSelector::Warm,
        FilterSelector::Grayscale,
    ];

    /// Human-readable name, also accepted by [`FilterSelector::from_name`].
    pub fn label(self) -> &'static str {
        match self {
            FilterSelector::Original => "Original",
            FilterSelector::Brighten => "Brighten",
            FilterSelector::Cool => "Cool",
            FilterSelector::Warm => "Warm",
            FilterSelector::Grayscale => "Grayscale",
        }
    }

    /// Parse a filter name (case-insensitive). Unknown names map to `Original`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }
}

/// Apply a filter, returning a new raster with the same dimensions and mode.
pub fn apply_filter(image: &Raster, filter: FilterSelector) -> Raster {
    let mut out = image.clone();
    // Early exit if no filter
    if filter == FilterSelector::Original {
        return out;
    }

    let channels = image.mode.channels();
    for chunk in out.pixels.chunks_exact_mut(channels) {
        let [r, g, b] = filter_pixel(chunk[0], chunk[1], chunk[2], filter);
        chunk[0] = r;
        chunk[1] = g;
        chunk[2] = b;
    }
    out
}

/// Apply a filter to a single RGB pixel.
#[inline]
pub fn filter_pixel(r: u8, g: u8, b: u8, filter: FilterSelector) -> [u8; 3] {
    match filter {
        FilterSelector::Original => [r, g, b],
        FilterSelector::Brighten => [brighten(r), brighten(g), brighten(b)],
        FilterSelector::Cool => [r, g, b.saturating_add(TINT_OFFSET)],
        FilterSelector::Warm => [r.saturating_add(TINT_OFFSET), g, b],
        FilterSelector::Grayscale => {
            let l = luma_u8(r, g, b);
            [l, l, l]
        }
    }
}

/// Truncates toward zero, like an extrapolating blend from black.
#[inline]
fn brighten(v: u8) -> u8 {
    (v as f32 * BRIGHTEN_FACTOR).min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorMode;

    fn gradient(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(240);
            }
        }
        Raster::new(width, height, ColorMode::Rgb, pixels).unwrap()
    }

    #[test]
    fn test_original_is_identity() {
        let img = gradient(16, 8);
        assert_eq!(apply_filter(&img, FilterSelector::Original), img);
    }

    #[test]
    fn test_brighten() {
        assert_eq!(filter_pixel(100, 200, 250, FilterSelector::Brighten), [110, 220, 255]);
        assert_eq!(filter_pixel(0, 0, 0, FilterSelector::Brighten), [0, 0, 0]);
    }

    #[test]
    fn test_brighten_truncates_fractions() {
        // 5.5, 16.5 and 27.5 all drop their fractional part
        assert_eq!(filter_pixel(5, 15, 25, FilterSelector::Brighten), [5, 16, 27]);
        assert_eq!(filter_pixel(9, 19, 231, FilterSelector::Brighten), [9, 20, 254]);
        assert_eq!(filter_pixel(232, 240, 255, FilterSelector::Brighten), [255, 255, 255]);
    }

    #[test]
    fn test_cool_and_warm_offsets() {
        assert_eq!(filter_pixel(10, 20, 30, FilterSelector::Cool), [10, 20, 50]);
        assert_eq!(filter_pixel(10, 20, 30, FilterSelector::Warm), [30, 20, 30]);
        // Clamped at the ceiling
        assert_eq!(filter_pixel(250, 0, 250, FilterSelector::Cool), [250, 0, 255]);
        assert_eq!(filter_pixel(250, 0, 250, FilterSelector::Warm), [255, 0, 250]);
    }

    #[test]
    fn test_grayscale_white_is_noop() {
        let img = Raster::filled_rgb(4, 4, [255, 255, 255]);
        assert_eq!(apply_filter(&img, FilterSelector::Grayscale), img);
    }

    #[test]
    fn test_alpha_passes_through() {
        let img = Raster::filled_rgba(3, 3, [100, 100, 100, 42]);
        let out = apply_filter(&img, FilterSelector::Warm);
        assert_eq!(out.mode, ColorMode::Rgba);
        for px in out.pixels.chunks_exact(4) {
            assert_eq!(px, &[120, 100, 100, 42]);
        }
    }

    #[test]
    fn test_preserves_dimensions() {
        let img = gradient(13, 7);
        for filter in FilterSelector::ALL {
            let out = apply_filter(&img, filter);
            assert_eq!(out.dimensions(), (13, 7));
            assert_eq!(out.mode, img.mode);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(FilterSelector::from_name("Warm"), FilterSelector::Warm);
        assert_eq!(FilterSelector::from_name("grayscale"), FilterSelector::Grayscale);
        assert_eq!(FilterSelector::from_name(" Cool "), FilterSelector::Cool);
        // Unknown names fall back to Original
        assert_eq!(FilterSelector::from_name("Sepia"), FilterSelector::Original);
        assert_eq!(FilterSelector::from_name(""), FilterSelector::Original);
    }

    #[test]
    fn test_labels_round_trip() {
        for filter in FilterSelector::ALL {
            assert_eq!(FilterSelector::from_name(filter.label()), filter);
        }
    }
}
