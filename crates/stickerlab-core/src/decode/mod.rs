//! Ingestion of uploaded photos and sticker files.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG bytes (format is sniffed, not trusted from the name)
//! - Applying JPEG EXIF orientation so phone photos appear upright
//! - Reading image files from disk for the asset catalog
//!
//! Every decoded image is normalized to RGBA.

mod orientation;
mod reader;

pub use orientation::Orientation;
pub use reader::{decode_image, get_orientation, load_image_file};

#[cfg(test)]
pub(crate) use reader::decode_image_no_orientation;

use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a recognized image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(String),
}
