//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! BT.601 is the weighting used by conventional "convert to grayscale"
//! operations, so the Grayscale filter matches what users expect from
//! other photo tools.

/// ITU-R BT.601 weight for red, in thousandths.
pub const LUMA_R: u32 = 299;

/// ITU-R BT.601 weight for green, in thousandths.
pub const LUMA_G: u32 = 587;

/// ITU-R BT.601 weight for blue, in thousandths.
pub const LUMA_B: u32 = 114;

/// Calculate luma from u8 RGB values (0 to 255).
///
/// Integer math with rounding: `(299R + 587G + 114B + 500) / 1000`.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((sum + 500) / 1000).min(255) as u8
}
