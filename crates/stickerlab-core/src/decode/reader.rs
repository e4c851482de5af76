//! Byte and file decoding into RGBA rasters.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, Orientation};
use crate::raster::Raster;

/// Decode a JPEG or PNG image from bytes, applying EXIF orientation.
///
/// Any color mode is accepted; the result is always RGBA (opaque sources
/// get alpha 255).
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a known format.
/// Returns `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    Ok(Raster::from_rgba_image(orientation.apply(img).into_rgba8()))
}

/// Decode an image from bytes without applying EXIF orientation.
#[cfg(test)]
pub(crate) fn decode_image_no_orientation(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(Raster::from_rgba_image(img.into_rgba8()))
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> Result<Raster, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
    decode_image(&bytes)
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<image::DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}
