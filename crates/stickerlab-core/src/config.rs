//! Catalog and engine configuration.
//!
//! Configuration is plain serde data. Every field has a default, so a JSON
//! document only needs the keys it wants to change:
//!
//! ```json
//! {
//!   "sticker_dir": "static/stickers",
//!   "typefaces": [{ "name": "Serif", "path": "fonts/serif.ttf" }],
//!   "text_anchor": "centered"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::TextAnchor;

/// Pre-shrink factor applied to every sticker when the catalog loads.
pub const DEFAULT_INITIAL_SCALE: f32 = 0.5;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error reading config {path}: {reason}")]
    Io { path: String, reason: String },

    /// The document is not valid configuration JSON.
    #[error("Invalid config: {0}")]
    Parse(String),

    /// A value parsed but is unusable.
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// One sticker in the asset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerEntry {
    /// Stable identity, e.g. `"glasses"`.
    pub key: String,
    /// Human-readable name shown next to the checkbox.
    pub label: String,
    /// File name relative to `sticker_dir` (or an absolute path).
    pub file: PathBuf,
}

impl StickerEntry {
    pub fn new(key: impl Into<String>, label: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            file: file.into(),
        }
    }
}

/// One typeface in the typeface catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypefaceEntry {
    /// Display name, e.g. `"Serif"`.
    pub name: String,
    /// Path to a TrueType/OpenType file.
    pub path: PathBuf,
}

/// Configuration for the asset and typeface catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory sticker files are resolved against.
    pub sticker_dir: PathBuf,
    /// Stickers in display order.
    pub stickers: Vec<StickerEntry>,
    /// Named typefaces. Missing files fall back to the default typeface.
    pub typefaces: Vec<TypefaceEntry>,
    /// Pre-shrink factor applied once at load (0.5 halves every sticker).
    pub initial_scale: f32,
    /// Text anchoring used by sessions built from this config.
    pub text_anchor: TextAnchor,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let stickers = [
            ("glasses", "Glasses"),
            ("hat", "Hat"),
            ("mustache", "Mustache"),
            ("heart", "Heart"),
            ("bowknot", "Bowknot"),
            ("sunshine", "Sunshine"),
        ]
        .into_iter()
        .map(|(key, label)| StickerEntry::new(key, label, format!("{key}.png")))
        .collect();

        Self {
            sticker_dir: PathBuf::from("assets/stickers"),
            stickers,
            typefaces: Vec::new(),
            initial_scale: DEFAULT_INITIAL_SCALE,
            text_anchor: TextAnchor::default(),
        }
    }
}

impl CatalogConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Full path of a sticker file.
    pub fn sticker_path(&self, entry: &StickerEntry) -> PathBuf {
        self.sticker_dir.join(&entry.file)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_scale.is_finite() && self.initial_scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "initial_scale",
                reason: format!("must be a positive number, got {}", self.initial_scale),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let config = CatalogConfig::default();
        let keys: Vec<&str> = config.stickers.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["glasses", "hat", "mustache", "heart", "bowknot", "sunshine"]
        );
        assert_eq!(config.initial_scale, 0.5);
        assert_eq!(config.text_anchor, TextAnchor::TopLeftClamped);
        assert_eq!(
            config.sticker_path(&config.stickers[3]),
            PathBuf::from("assets/stickers/heart.png")
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CatalogConfig::from_json_str(
            r#"{"sticker_dir": "static", "text_anchor": "centered"}"#,
        )
        .unwrap();
        assert_eq!(config.sticker_dir, PathBuf::from("static"));
        assert_eq!(config.text_anchor, TextAnchor::Centered);
        assert_eq!(config.stickers.len(), 6);
        assert_eq!(config.initial_scale, 0.5);
    }

    #[test]
    fn test_json_with_entries() {
        let config = CatalogConfig::from_json_str(
            r#"{
                "stickers": [{"key": "star", "label": "Star", "file": "star.png"}],
                "typefaces": [{"name": "Serif", "path": "fonts/serif.ttf"}],
                "initial_scale": 1.0
            }"#,
        )
        .unwrap();
        assert_eq!(config.stickers, vec![StickerEntry::new("star", "Star", "star.png")]);
        assert_eq!(config.typefaces[0].name, "Serif");
        assert_eq!(config.initial_scale, 1.0);
    }

    #[test]
    fn test_invalid_json() {
        let err = CatalogConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_initial_scale() {
        let err = CatalogConfig::from_json_str(r#"{"initial_scale": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "initial_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogConfig::from_json_file(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
