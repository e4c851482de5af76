//! PNG export WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, export_file_name, export_mime_type } from '@stickerlab/wasm';
//!
//! const blob = new Blob([encode_png(image)], { type: export_mime_type() });
//! link.download = export_file_name();
//! ```

use crate::types::JsRaster;
use stickerlab_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a raster as lossless PNG bytes.
///
/// # Errors
///
/// Returns an error for an empty raster or if encoding fails.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.raster()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Suggested download file name for exported images.
#[wasm_bindgen]
pub fn export_file_name() -> String {
    encode::EXPORT_FILE_NAME.to_string()
}

/// MIME type of exported images.
#[wasm_bindgen]
pub fn export_mime_type() -> String {
    encode::EXPORT_MIME_TYPE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerlab_core::raster::Raster;

    #[test]
    fn test_encode_png_signature() {
        let img = JsRaster::from_raster(Raster::filled_rgba(8, 8, [1, 2, 3, 4]));
        let png = encode_png(&img).ok().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_export_names() {
        assert_eq!(export_file_name(), "sticker_image.png");
        assert_eq!(export_mime_type(), "image/png");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use stickerlab_core::raster::Raster;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_empty_fails() {
        let img = JsRaster::from_raster(Raster::transparent(0, 0));
        assert!(encode_png(&img).is_err());
    }
}
