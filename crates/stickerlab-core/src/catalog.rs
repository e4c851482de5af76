//! Sticker and typeface catalogs.
//!
//! Both catalogs are built once, before any session starts, and are shared
//! read-only afterwards (wrap them in `Arc`). Loading never fails outright:
//! a sticker or font that can't be read is logged, recorded as a
//! [`CatalogWarning`], and left out of the catalog.

use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::config::{CatalogConfig, DEFAULT_INITIAL_SCALE};
use crate::decode::{decode_image, load_image_file, DecodeError};
use crate::raster::Raster;
use crate::text::{Typeface, TypefaceError};
use crate::transform::{scale_raster, FilterType};

/// Non-fatal problems found while loading or resolving catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogWarning {
    /// A sticker file does not exist.
    #[error("Sticker '{key}' not found at {path}")]
    MissingAsset { key: String, path: String },

    /// A sticker file exists but is not a readable image.
    #[error("Sticker '{key}' could not be decoded: {reason}")]
    UndecodableAsset { key: String, reason: String },

    /// A typeface is not available; the default typeface is used instead.
    #[error("Typeface '{name}' not found, using the default typeface")]
    MissingTypeface { name: String },

    /// A typeface file exists but could not be loaded.
    #[error("Typeface '{name}' failed to load ({reason}), using the default typeface")]
    TypefaceLoadFailure { name: String, reason: String },
}

/// An immutable, named sticker bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayAsset {
    /// Stable identity, e.g. `"glasses"`.
    pub key: String,
    /// Human-readable name.
    pub label: String,
    /// RGBA bitmap, already pre-shrunk by the catalog's initial scale.
    pub raster: Raster,
}

impl OverlayAsset {
    pub fn new(key: impl Into<String>, label: impl Into<String>, raster: Raster) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            raster,
        }
    }
}

/// Stickers in display order.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    initial_scale: f32,
    assets: Vec<OverlayAsset>,
    warnings: Vec<CatalogWarning>,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_SCALE)
    }
}

impl AssetCatalog {
    /// An empty catalog that pre-shrinks inserted stickers by `initial_scale`.
    pub fn new(initial_scale: f32) -> Self {
        let initial_scale = if initial_scale.is_finite() && initial_scale > 0.0 {
            initial_scale
        } else {
            DEFAULT_INITIAL_SCALE
        };
        Self {
            initial_scale,
            assets: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Load every sticker listed in `config`.
    pub fn load(config: &CatalogConfig) -> Self {
        let mut catalog = Self::new(config.initial_scale);

        for entry in &config.stickers {
            let path = config.sticker_path(entry);
            if !path.exists() {
                warn!("Sticker '{}' not found at {}", entry.key, path.display());
                catalog.warnings.push(CatalogWarning::MissingAsset {
                    key: entry.key.clone(),
                    path: path.display().to_string(),
                });
                continue;
            }
            match load_image_file(&path) {
                Ok(raster) => {
                    debug!(
                        "Loaded sticker '{}' ({}x{}) from {}",
                        entry.key,
                        raster.width,
                        raster.height,
                        path.display()
                    );
                    catalog.insert_raster(&entry.key, &entry.label, raster);
                }
                Err(e) => {
                    warn!("Sticker '{}' could not be decoded: {}", entry.key, e);
                    catalog.warnings.push(CatalogWarning::UndecodableAsset {
                        key: entry.key.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        catalog
    }

    /// Decode and add a sticker from in-memory bytes.
    ///
    /// An existing entry with the same key is replaced in place.
    pub fn insert_bytes(
        &mut self,
        key: &str,
        label: &str,
        bytes: &[u8],
    ) -> Result<(), DecodeError> {
        let raster = decode_image(bytes)?;
        self.insert_raster(key, label, raster);
        Ok(())
    }

    /// Add a sticker bitmap, converting it to RGBA and applying the pre-shrink.
    pub fn insert_raster(&mut self, key: &str, label: &str, raster: Raster) {
        let raster = if self.initial_scale == 1.0 {
            raster.to_rgba()
        } else {
            scale_raster(&raster, self.initial_scale, FilterType::Lanczos3)
        };
        let asset = OverlayAsset::new(key, label, raster);

        match self.assets.iter_mut().find(|a| a.key == key) {
            Some(existing) => *existing = asset,
            None => self.assets.push(asset),
        }
    }

    pub fn get(&self, key: &str) -> Option<&OverlayAsset> {
        self.assets.iter().find(|a| a.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in catalog order.
    pub fn keys(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayAsset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn initial_scale(&self) -> f32 {
        self.initial_scale
    }

    /// Problems recorded while loading.
    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }
}

/// Named typefaces plus the default used for every fallback.
#[derive(Debug, Clone, Default)]
pub struct TypefaceCatalog {
    default: Typeface,
    faces: Vec<(String, Typeface)>,
    warnings: Vec<CatalogWarning>,
}

impl TypefaceCatalog {
    /// An empty catalog whose default is the built-in bitmap font.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty catalog with an explicit default typeface.
    pub fn with_default(default: Typeface) -> Self {
        Self {
            default,
            ..Self::default()
        }
    }

    /// Load every typeface listed in `config`.
    pub fn load(config: &CatalogConfig) -> Self {
        let mut catalog = Self::new();
        for entry in &config.typefaces {
            match Typeface::from_file(&entry.path) {
                Ok(face) => {
                    debug!("Loaded typeface '{}' from {}", entry.name, entry.path.display());
                    catalog.insert(&entry.name, face);
                }
                Err(e) => catalog.record_load_error(&entry.name, &entry.path, e),
            }
        }
        catalog
    }

    fn record_load_error(&mut self, name: &str, path: &Path, error: TypefaceError) {
        warn!(
            "Typeface '{}' unavailable ({}), using the default typeface",
            name, error
        );
        let warning = match error {
            TypefaceError::Missing(_) => CatalogWarning::MissingTypeface {
                name: name.to_string(),
            },
            other => CatalogWarning::TypefaceLoadFailure {
                name: name.to_string(),
                reason: format!("{}: {}", path.display(), other),
            },
        };
        self.warnings.push(warning);
    }

    /// Add or replace a typeface.
    pub fn insert(&mut self, name: &str, face: Typeface) {
        match self.faces.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = face,
            None => self.faces.push((name.to_string(), face)),
        }
    }

    /// Parse and add a typeface from font bytes.
    pub fn insert_bytes(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), TypefaceError> {
        let face = Typeface::from_bytes(bytes)?;
        self.insert(name, face);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Typeface> {
        self.faces.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    /// The typeface for `name`, or the default with a warning when it is unknown.
    ///
    /// `None` asks for the default and never warns.
    pub fn resolve(&self, name: Option<&str>) -> (&Typeface, Option<CatalogWarning>) {
        let Some(name) = name else {
            return (&self.default, None);
        };
        if let Some(face) = self.get(name) {
            return (face, None);
        }

        // Prefer the load-time reason if there was one
        let warning = self
            .warnings
            .iter()
            .find(|w| match w {
                CatalogWarning::MissingTypeface { name: n }
                | CatalogWarning::TypefaceLoadFailure { name: n, .. } => n == name,
                _ => false,
            })
            .cloned()
            .unwrap_or_else(|| CatalogWarning::MissingTypeface {
                name: name.to_string(),
            });
        warn!("{}", warning);
        (&self.default, Some(warning))
    }

    pub fn default_typeface(&self) -> &Typeface {
        &self.default
    }

    /// Typeface names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.faces.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }
}
