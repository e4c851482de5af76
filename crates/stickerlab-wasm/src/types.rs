//! WASM-compatible wrapper type for rasters.
//!
//! JavaScript only ever sees RGBA: every raster handed out by these bindings
//! is converted on the way out, so the pixel buffer can go straight into an
//! `ImageData`.

use stickerlab_core::raster::{ColorMode, Raster};
use wasm_bindgen::prelude::*;

/// An RGBA image held in WASM memory.
///
/// # Memory Management
///
/// `pixels()` copies the buffer into a JavaScript `Uint8Array`. Keep rasters
/// in WASM memory between calls and only extract pixels for display.
#[wasm_bindgen]
pub struct JsRaster {
    inner: Raster,
}

#[wasm_bindgen]
impl JsRaster {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRaster, JsValue> {
        Raster::new(width, height, ColorMode::Rgba, pixels)
            .map(|inner| JsRaster { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }
}

impl JsRaster {
    /// Wrap a core raster, converting it to RGBA.
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            inner: raster.to_rgba(),
        }
    }

    pub(crate) fn raster(&self) -> &Raster {
        &self.inner
    }
}
