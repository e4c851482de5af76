//! Upload decoding WASM bindings.

use crate::types::JsRaster;
use stickerlab_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG upload into an RGBA raster.
///
/// JPEG EXIF orientation is applied so phone photos appear upright.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerlab_core::encode::encode_png;
    use stickerlab_core::raster::Raster;

    #[test]
    fn test_decode_png_upload() {
        let png = encode_png(&Raster::filled_rgb(4, 3, [10, 20, 30])).unwrap();
        let img = decode_image(&png).ok().unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
        assert_eq!(&img.pixels()[..4], &[10, 20, 30, 255]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }
}
