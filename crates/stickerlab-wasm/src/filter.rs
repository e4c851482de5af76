//! Color filter WASM bindings.

use crate::types::JsRaster;
use stickerlab_core::filter::{self, FilterSelector};
use wasm_bindgen::prelude::*;

/// Apply a color filter by name.
///
/// Names are matched case-insensitively; an unknown name leaves the image
/// unchanged (Original).
#[wasm_bindgen]
pub fn apply_filter(image: &JsRaster, name: &str) -> JsRaster {
    let selector = FilterSelector::from_name(name);
    JsRaster::from_raster(filter::apply_filter(image.raster(), selector))
}

/// Filter labels in display order, for populating a dropdown.
#[wasm_bindgen]
pub fn filter_names() -> js_sys::Array {
    FilterSelector::ALL
        .iter()
        .map(|f| JsValue::from_str(f.label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerlab_core::raster::Raster;

    #[test]
    fn test_apply_filter_by_name() {
        let img = JsRaster::from_raster(Raster::filled_rgb(2, 2, [100, 100, 100]));
        let warm = apply_filter(&img, "Warm");
        assert_eq!(&warm.pixels()[..4], &[120, 100, 100, 255]);
    }

    #[test]
    fn test_unknown_filter_is_identity() {
        let img = JsRaster::from_raster(Raster::filled_rgba(2, 2, [10, 20, 30, 40]));
        assert_eq!(apply_filter(&img, "sepia").pixels(), img.pixels());
    }
}
