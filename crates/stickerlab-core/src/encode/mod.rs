//! Export encoding.
//!
//! This module provides functionality for:
//! - Encoding the final composite to lossless PNG (alpha kept when present)
//! - Packaging the bytes with the download file name and MIME type
//!
//! PNG output carries no timestamp chunks, so identical pixels always
//! produce identical bytes.

mod png;

pub use png::{encode_png, export, EncodeError, ExportArtifact, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
