//! Stickerlab WASM - WebAssembly bindings for Stickerlab
//!
//! This crate provides WASM bindings to expose the stickerlab-core compositing
//! engine to a browser control surface.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for rasters
//! - `decode` - Upload decoding (JPEG, PNG)
//! - `encode` - PNG export
//! - `filter` - Color filters
//! - `session` - Stateful editing session (stickers, placements, text)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsSession } from '@stickerlab/wasm';
//!
//! await init();
//!
//! const base = decode_image(new Uint8Array(await photo.arrayBuffer()));
//! const session = new JsSession();
//! session.add_sticker('heart', 'Heart', heartBytes);
//! session.select('heart');
//! session.set_placement('heart', { position: [120, 80], scale: 1.5, rotation: 15 });
//! const png = session.export(base);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod filter;
mod session;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::{encode_png, export_file_name, export_mime_type};
pub use filter::{apply_filter, filter_names};
pub use session::JsSession;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
