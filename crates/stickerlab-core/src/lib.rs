//! Stickerlab Core - Image compositing library
//!
//! This crate provides the compositing engine behind Stickerlab: color
//! filters, sticker transform and paste, text overlay, and PNG export, plus
//! the catalogs and per-session state a control surface drives them with.
//!
//! # Render Order
//!
//! 1. Color filter on the base photo
//! 2. Stickers, in selection order (scale, rotate, paste)
//! 3. Optional caption
//! 4. PNG encode

pub mod catalog;
pub mod composite;
pub mod config;
pub mod decode;
pub mod encode;
pub mod filter;
pub mod luminance;
pub mod pipeline;
pub mod raster;
pub mod session;
pub mod store;
pub mod text;
pub mod transform;

pub use catalog::{AssetCatalog, CatalogWarning, OverlayAsset, TypefaceCatalog};
pub use composite::{blend_over, paste, paste_all};
pub use config::{CatalogConfig, ConfigError, StickerEntry, TypefaceEntry};
pub use decode::{decode_image, DecodeError};
pub use encode::{encode_png, export, EncodeError, ExportArtifact};
pub use filter::{apply_filter, FilterSelector};
pub use pipeline::render;
pub use raster::{ColorMode, Raster, RasterError};
pub use session::{RenderOutput, Session, SessionError};
pub use store::{OverlayPlacement, TransformStore};
pub use text::{draw_text, TextAnchor, TextSpec, Typeface, TypefaceError, MAX_TEXT_SIZE};
pub use transform::{
    apply_rotation, compute_rotated_bounds, render_overlay, InterpolationFilter, RenderedOverlay,
};
