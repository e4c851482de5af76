//! PNG encoding for export.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ExtendedColorType;
use image::ImageEncoder;
use serde::Serialize;
use thiserror::Error;

use crate::raster::{ColorMode, Raster};

/// Suggested file name for the download affordance.
pub const EXPORT_FILE_NAME: &str = "sticker_image.png";

/// MIME type of the exported bytes.
pub const EXPORT_MIME_TYPE: &str = "image/png";

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoded export plus the metadata a host needs to offer it as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

/// Encode a raster to PNG bytes.
///
/// RGBA rasters are written as 8-bit RGBA, RGB rasters as 8-bit RGB.
/// Compression settings are fixed so output is reproducible.
pub fn encode_png(image: &Raster) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = image.pixel_count() * image.mode.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let color = match image.mode {
        ColorMode::Rgb => ExtendedColorType::Rgb8,
        ColorMode::Rgba => ExtendedColorType::Rgba8,
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, FilterType::Adaptive);
    encoder
        .write_image(&image.pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a raster and attach the download file name and MIME type.
pub fn export(image: &Raster) -> Result<ExportArtifact, EncodeError> {
    Ok(ExportArtifact {
        bytes: encode_png(image)?,
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::decode_image_no_orientation;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=24, 1u32..=24)
    }

    proptest! {
        /// Property: decode(encode(image)) reproduces any RGBA raster exactly.
        #[test]
        fn prop_png_round_trip_lossless(
            raster in dimensions_strategy().prop_flat_map(|(w, h)| {
                let size = (w * h * 4) as usize;
                prop::collection::vec(any::<u8>(), size..=size)
                    .prop_map(move |pixels| Raster::new(w, h, ColorMode::Rgba, pixels).unwrap())
            })
        ) {
            let bytes = encode_png(&raster).unwrap();
            let decoded = decode_image_no_orientation(&bytes).unwrap();
            prop_assert_eq!(decoded, raster);
        }
    }
}
