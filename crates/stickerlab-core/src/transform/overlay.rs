//! Turn a catalog sticker plus its placement into a positioned bitmap.

use crate::catalog::OverlayAsset;
use crate::raster::Raster;
use crate::store::OverlayPlacement;

use super::resize::{scale_raster, FilterType};
use super::rotation::{apply_rotation, InterpolationFilter};

/// A sticker bitmap ready to paste, with the top-left corner it goes at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOverlay {
    /// Scaled and rotated RGBA bitmap.
    pub bitmap: Raster,
    /// Top-left corner in base-image pixels. May be negative.
    pub anchor: (i32, i32),
}

/// Top-left corner that puts the centre of a `width` x `height` bitmap on `position`.
pub fn overlay_anchor(position: (i32, i32), width: u32, height: u32) -> (i32, i32) {
    let half_w = (width / 2) as i64;
    let half_h = (height / 2) as i64;
    let x = position.0 as i64 - half_w;
    let y = position.1 as i64 - half_h;
    (
        x.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        y.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
    )
}

/// Scale, rotate and anchor a sticker.
///
/// The placement is clamped into its accepted range first, so out-of-range
/// values never reach the resampler.
pub fn render_overlay(asset: &OverlayAsset, placement: &OverlayPlacement) -> RenderedOverlay {
    let placement = placement.clamped();

    let scaled = scale_raster(&asset.raster, placement.scale, FilterType::Lanczos3);
    let bitmap = if placement.rotation == 0.0 {
        scaled
    } else {
        apply_rotation(
            &scaled,
            placement.rotation as f64,
            InterpolationFilter::Bilinear,
        )
    };

    let anchor = overlay_anchor(placement.position, bitmap.width, bitmap.height);
    RenderedOverlay { bitmap, anchor }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(width: u32, height: u32) -> OverlayAsset {
        OverlayAsset::new(
            "heart",
            "Heart",
            Raster::filled_rgba(width, height, [255, 0, 0, 255]),
        )
    }

    #[test]
    fn test_identity_placement_centres_bitmap() {
        let rendered = render_overlay(&asset(20, 20), &OverlayPlacement::new((50, 50), 1.0, 0.0));
        assert_eq!(rendered.bitmap.dimensions(), (20, 20));
        assert_eq!(rendered.anchor, (40, 40));
    }

    #[test]
    fn test_odd_size_anchor_uses_integer_division() {
        assert_eq!(overlay_anchor((10, 10), 5, 7), (8, 7));
        assert_eq!(overlay_anchor((0, 0), 30, 30), (-15, -15));
    }

    #[test]
    fn test_scale_truncates() {
        let rendered = render_overlay(&asset(15, 9), &OverlayPlacement::new((0, 0), 1.5, 0.0));
        // 22.5 → 22, 13.5 → 13
        assert_eq!(rendered.bitmap.dimensions(), (22, 13));
        assert_eq!(rendered.anchor, (-11, -6));
    }

    #[test]
    fn test_rotation_grows_canvas() {
        let p = OverlayPlacement::new((100, 100), 1.0, 90.0);
        let rendered = render_overlay(&asset(20, 10), &p);
        assert_eq!(rendered.bitmap.dimensions(), (10, 20));
        assert_eq!(rendered.anchor, (95, 90));

        let p = OverlayPlacement::new((100, 100), 1.0, 45.0);
        let rendered = render_overlay(&asset(20, 20), &p);
        assert!(rendered.bitmap.width > 20 && rendered.bitmap.height > 20);
    }

    #[test]
    fn test_out_of_range_placement_is_clamped() {
        let rendered = render_overlay(&asset(10, 10), &OverlayPlacement::new((0, 0), 100.0, 0.0));
        assert_eq!(rendered.bitmap.dimensions(), (30, 30));

        let rendered = render_overlay(&asset(10, 10), &OverlayPlacement::new((0, 0), 0.0, 0.0));
        assert_eq!(rendered.bitmap.dimensions(), (5, 5));
    }

    #[test]
    fn test_tiny_sticker_never_collapses() {
        let rendered = render_overlay(&asset(1, 1), &OverlayPlacement::new((0, 0), 0.5, 0.0));
        assert_eq!(rendered.bitmap.dimensions(), (1, 1));
    }

    #[test]
    fn test_output_is_rgba() {
        let rgb = OverlayAsset::new("x", "X", Raster::filled_rgb(4, 4, [1, 2, 3]));
        let rendered = render_overlay(&rgb, &OverlayPlacement::default());
        assert!(rendered.bitmap.mode.has_alpha());
    }
}
