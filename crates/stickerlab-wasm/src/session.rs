//! Editing session WASM bindings.
//!
//! A `JsSession` owns its sticker and typeface catalogs plus the editing
//! state the control surface changes: filter, selected stickers, their
//! placements and the optional caption. Placements and text cross the
//! boundary as plain objects:
//!
//! ```typescript
//! session.set_placement('hat', { position: [120, 40], scale: 1.2, rotation: -10 });
//! session.set_text({ content: 'Hello', size: 32, color: [255, 255, 255], position: [20, 20] });
//! session.set_text(null); // remove the caption
//! ```

use std::sync::Arc;

use crate::types::JsRaster;
use stickerlab_core::catalog::{AssetCatalog, TypefaceCatalog};
use stickerlab_core::config::DEFAULT_INITIAL_SCALE;
use stickerlab_core::filter::FilterSelector;
use stickerlab_core::session::Session;
use stickerlab_core::store::OverlayPlacement;
use stickerlab_core::text::{TextAnchor, TextSpec};
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Stateful editing session for JavaScript.
#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
    last_warnings: Vec<String>,
}

#[wasm_bindgen]
impl JsSession {
    /// Create an empty session. Stickers added later are pre-shrunk by
    /// `initial_scale` (default 0.5).
    #[wasm_bindgen(constructor)]
    pub fn new(initial_scale: Option<f32>) -> JsSession {
        let assets = AssetCatalog::new(initial_scale.unwrap_or(DEFAULT_INITIAL_SCALE));
        JsSession {
            inner: Session::new(
                Arc::new(assets),
                Arc::new(TypefaceCatalog::new()),
                TextAnchor::default(),
            ),
            last_warnings: Vec::new(),
        }
    }

    /// Decode and register a sticker.
    pub fn add_sticker(&mut self, key: &str, label: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner
            .assets_mut()
            .insert_bytes(key, label, bytes)
            .map_err(to_js_error)
    }

    /// Parse and register a TrueType/OpenType font.
    pub fn add_typeface(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), JsValue> {
        self.inner
            .typefaces_mut()
            .insert_bytes(name, bytes)
            .map_err(to_js_error)
    }

    /// Registered sticker keys in catalog order.
    pub fn sticker_keys(&self) -> Vec<String> {
        self.inner
            .assets()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Select a filter by name. Unknown names select Original.
    pub fn set_filter(&mut self, name: &str) {
        self.inner.set_filter(FilterSelector::from_name(name));
    }

    /// Label of the current filter.
    pub fn filter(&self) -> String {
        self.inner.filter().label().to_string()
    }

    /// Add a sticker to the end of the paste order.
    pub fn select(&mut self, key: &str) -> Result<(), JsValue> {
        self.inner.select(key).map_err(to_js_error)
    }

    /// Remove a sticker from the paste order. Returns false if it wasn't selected.
    pub fn deselect(&mut self, key: &str) -> bool {
        self.inner.deselect(key)
    }

    /// Selected sticker keys in paste order.
    pub fn selected(&self) -> Vec<String> {
        self.inner.selected().to_vec()
    }

    /// Current placement of a sticker as `{ position, scale, rotation }`.
    pub fn placement(&mut self, key: &str) -> Result<JsValue, JsValue> {
        let placement = self.inner.placement(key).map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&placement).map_err(to_js_error)
    }

    /// Store a placement. Returns the stored (clamped) placement.
    pub fn set_placement(&mut self, key: &str, value: JsValue) -> Result<JsValue, JsValue> {
        let placement: OverlayPlacement = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid placement: {}", e)))?;
        let stored = self
            .inner
            .set_placement(key, placement)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&stored).map_err(to_js_error)
    }

    /// Set the caption, or remove it with `null`/`undefined`.
    pub fn set_text(&mut self, value: JsValue) -> Result<(), JsValue> {
        if value.is_null() || value.is_undefined() {
            self.inner.set_text(None);
            return Ok(());
        }
        let spec: TextSpec = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid text: {}", e)))?;
        self.inner.set_text(Some(spec));
        Ok(())
    }

    /// Set text anchoring: `"top-left-clamped"` or `"centered"`.
    pub fn set_text_anchor(&mut self, name: &str) -> Result<(), JsValue> {
        let anchor = parse_text_anchor(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown text anchor: {}", name)))?;
        self.inner.set_text_anchor(anchor);
        Ok(())
    }

    /// Compose the current state onto `base`.
    pub fn render(&mut self, base: &JsRaster) -> JsRaster {
        let output = self.inner.render(base.raster());
        self.last_warnings = output.warnings.iter().map(|w| w.to_string()).collect();
        JsRaster::from_raster(output.image)
    }

    /// Compose and encode as PNG bytes.
    pub fn export(&mut self, base: &JsRaster) -> Result<Vec<u8>, JsValue> {
        let output = self.inner.render(base.raster());
        self.last_warnings = output.warnings.iter().map(|w| w.to_string()).collect();
        stickerlab_core::encode::encode_png(&output.image).map_err(to_js_error)
    }

    /// Warnings from the most recent render or export.
    pub fn warnings(&self) -> js_sys::Array {
        self.last_warnings
            .iter()
            .map(|w| JsValue::from_str(w))
            .collect()
    }
}

fn parse_text_anchor(name: &str) -> Option<TextAnchor> {
    match name.trim().to_ascii_lowercase().as_str() {
        "top-left-clamped" | "top-left" => Some(TextAnchor::TopLeftClamped),
        "centered" | "center" => Some(TextAnchor::Centered),
        _ => None,
    }
}
