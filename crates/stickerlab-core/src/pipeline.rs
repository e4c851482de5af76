//! The render pipeline: filter, stickers, text.
//!
//! [`render`] is a pure function of its inputs. The same base image, filter,
//! ordered sticker list and text always produce byte-identical output.

use crate::catalog::OverlayAsset;
use crate::composite::paste;
use crate::filter::{apply_filter, FilterSelector};
use crate::raster::Raster;
use crate::store::OverlayPlacement;
use crate::text::{draw_text, TextAnchor, TextSpec, Typeface};
use crate::transform::render_overlay;

/// Compose one output image.
///
/// Stages run in a fixed order:
/// 1. `filter` is applied to `base`
/// 2. each sticker is scaled, rotated and pasted, in slice order
/// 3. `text`, if any, is drawn on top
///
/// The output has the base image's dimensions and is RGBA.
pub fn render(
    base: &Raster,
    filter: FilterSelector,
    overlays: &[(&OverlayAsset, OverlayPlacement)],
    text: Option<(&TextSpec, &Typeface)>,
    anchor: TextAnchor,
) -> Raster {
    let mut image = apply_filter(base, filter).to_rgba();

    for (asset, placement) in overlays {
        let rendered = render_overlay(asset, placement);
        image = paste(&image, &rendered.bitmap, rendered.anchor);
    }

    if let Some((spec, typeface)) = text {
        image = draw_text(&image, spec, typeface, anchor);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(size: u32) -> Raster {
        Raster::filled_rgb(size, size, [255, 255, 255])
    }

    fn red_heart() -> OverlayAsset {
        OverlayAsset::new("heart", "Heart", Raster::filled_rgba(40, 40, [255, 0, 0, 255]))
    }

    #[test]
    fn test_base_only_original_is_rgba_copy() {
        let base = white(8);
        let out = render(&base, FilterSelector::Original, &[], None, TextAnchor::default());
        assert_eq!(out, base.to_rgba());
    }

    #[test]
    fn test_grayscale_then_red_heart() {
        let base = white(200);
        let heart = red_heart();
        let out = render(
            &base,
            FilterSelector::Grayscale,
            &[(&heart, OverlayPlacement::new((100, 100), 1.0, 0.0))],
            None,
            TextAnchor::default(),
        );
        assert_eq!(out.dimensions(), (200, 200));
        // Stickers are pasted after filtering, so the heart stays red
        assert_eq!(out.get_rgba(100, 100), Some([255, 0, 0, 255]));
        assert_eq!(out.get_rgba(80, 80), Some([255, 0, 0, 255]));
        assert_eq!(out.get_rgba(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(out.get_rgba(79, 100), Some([255, 255, 255, 255]));
        assert_eq!(out.get_rgba(120, 100), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_sticker_order_matters() {
        let base = white(50);
        let red = OverlayAsset::new("a", "A", Raster::filled_rgba(10, 10, [255, 0, 0, 255]));
        let blue = OverlayAsset::new("b", "B", Raster::filled_rgba(10, 10, [0, 0, 255, 255]));
        let p = OverlayPlacement::new((25, 25), 1.0, 0.0);

        let anchor = TextAnchor::default();

        let rb = render(&base, FilterSelector::Original, &[(&red, p), (&blue, p)], None, anchor);
        let br = render(&base, FilterSelector::Original, &[(&blue, p), (&red, p)], None, anchor);
        assert_eq!(rb.get_rgba(25, 25), Some([0, 0, 255, 255]));
        assert_eq!(br.get_rgba(25, 25), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_text_drawn_over_stickers() {
        let base = white(60);
        let heart = OverlayAsset::new(
            "heart",
            "Heart",
            Raster::filled_rgba(60, 60, [255, 0, 0, 255]),
        );
        let text = TextSpec::new("I", 8, [0, 0, 0], (0, 0));
        let out = render(
            &base,
            FilterSelector::Original,
            &[(&heart, OverlayPlacement::new((30, 30), 1.0, 0.0))],
            Some((&text, &Typeface::Builtin)),
            TextAnchor::TopLeftClamped,
        );
        assert_eq!(out.get_rgba(2, 0), Some([0, 0, 0, 255]));
        assert_eq!(out.get_rgba(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let base = Raster::filled_rgb(64, 48, [120, 80, 40]);
        let heart = red_heart();
        let placements = [(&heart, OverlayPlacement::new((10, 40), 1.3, 33.0))];
        let text = TextSpec::new("Hi", 16, [0, 255, 0], (50, 40));

        let run = || {
            render(
                &base,
                FilterSelector::Warm,
                &placements,
                Some((&text, &Typeface::Builtin)),
                TextAnchor::default(),
            )
        };
        let a = run();
        let b = run();
        assert_eq!(a, b);
        assert_eq!(a.dimensions(), (64, 48));
    }
}
