//! Geometric operations on sticker bitmaps: scaling, rotation, placement.
//!
//! # Transform Order
//!
//! A sticker is prepared for compositing in this order:
//! 1. Scale (Lanczos3, dimensions truncated, never below 1x1)
//! 2. Rotate (bilinear, canvas expanded, transparent fill)
//! 3. Anchor (placement position is the centre of the rotated bitmap)
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Positions are integer pixels in base-image space
//! - Origin is top-left corner

mod overlay;
mod resize;
mod rotation;

pub use overlay::{overlay_anchor, render_overlay, RenderedOverlay};
pub use resize::{resize_raster, scale_raster, scaled_dimensions, FilterType};
pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
