//! One user's editing session.
//!
//! A [`Session`] holds everything a control surface changes between renders:
//! the filter, which stickers are selected (in selection order), where each
//! one sits, and the optional caption. Catalogs are shared read-only between
//! sessions; the transform store is private to each one.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{AssetCatalog, CatalogWarning, OverlayAsset, TypefaceCatalog};
use crate::config::CatalogConfig;
use crate::encode::{export, EncodeError, ExportArtifact};
use crate::filter::FilterSelector;
use crate::pipeline::render;
use crate::raster::Raster;
use crate::store::{OverlayPlacement, TransformStore};
use crate::text::{TextAnchor, TextSpec, MAX_TEXT_SIZE};

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The key is not in the asset catalog.
    #[error("Unknown overlay: {0}")]
    UnknownOverlay(String),

    /// Export failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// The result of one render pass.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Composed RGBA image with the base image's dimensions.
    pub image: Raster,
    /// Non-fatal fallbacks taken during this render.
    pub warnings: Vec<CatalogWarning>,
}

#[derive(Debug, Clone)]
pub struct Session {
    assets: Arc<AssetCatalog>,
    typefaces: Arc<TypefaceCatalog>,
    text_anchor: TextAnchor,
    filter: FilterSelector,
    selected: Vec<String>,
    store: TransformStore,
    text: Option<TextSpec>,
}

impl Session {
    pub fn new(
        assets: Arc<AssetCatalog>,
        typefaces: Arc<TypefaceCatalog>,
        text_anchor: TextAnchor,
    ) -> Self {
        Self {
            assets,
            typefaces,
            text_anchor,
            filter: FilterSelector::default(),
            selected: Vec::new(),
            store: TransformStore::new(),
            text: None,
        }
    }

    /// Load both catalogs from `config` and start a session on them.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(
            Arc::new(AssetCatalog::load(config)),
            Arc::new(TypefaceCatalog::load(config)),
            config.text_anchor,
        )
    }

    pub fn assets(&self) -> &AssetCatalog {
        &self.assets
    }

    pub fn typefaces(&self) -> &TypefaceCatalog {
        &self.typefaces
    }

    /// Mutable asset catalog. Clones it first if another session shares it.
    pub fn assets_mut(&mut self) -> &mut AssetCatalog {
        Arc::make_mut(&mut self.assets)
    }

    /// Mutable typeface catalog. Clones it first if another session shares it.
    pub fn typefaces_mut(&mut self) -> &mut TypefaceCatalog {
        Arc::make_mut(&mut self.typefaces)
    }

    pub fn filter(&self) -> FilterSelector {
        self.filter
    }

    pub fn set_filter(&mut self, filter: FilterSelector) {
        self.filter = filter;
    }

    pub fn text_anchor(&self) -> TextAnchor {
        self.text_anchor
    }

    pub fn set_text_anchor(&mut self, anchor: TextAnchor) {
        self.text_anchor = anchor;
    }

    /// Add a sticker to the end of the paste order.
    ///
    /// Selecting an already-selected key keeps its current position in the order.
    pub fn select(&mut self, key: &str) -> Result<(), SessionError> {
        if !self.assets.contains(key) {
            return Err(SessionError::UnknownOverlay(key.to_string()));
        }
        if !self.is_selected(key) {
            self.selected.push(key.to_string());
        }
        // First reference creates the default placement
        self.store.get(key);
        Ok(())
    }

    /// Remove a sticker from the paste order. Its placement is kept, so
    /// selecting it again restores where it was.
    pub fn deselect(&mut self, key: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|k| k != key);
        self.selected.len() != before
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    /// Selected keys in paste order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Current placement for `key`, creating the default on first access.
    pub fn placement(&mut self, key: &str) -> Result<OverlayPlacement, SessionError> {
        if !self.assets.contains(key) {
            return Err(SessionError::UnknownOverlay(key.to_string()));
        }
        Ok(self.store.get(key))
    }

    /// Store a placement. Out-of-range scale or rotation is clamped, not rejected.
    pub fn set_placement(
        &mut self,
        key: &str,
        placement: OverlayPlacement,
    ) -> Result<OverlayPlacement, SessionError> {
        if !self.assets.contains(key) {
            return Err(SessionError::UnknownOverlay(key.to_string()));
        }
        let clamped = placement.clamped();
        self.store.set(key, clamped);
        Ok(clamped)
    }

    pub fn text(&self) -> Option<&TextSpec> {
        self.text.as_ref()
    }

    /// Set or clear the caption. Its size is capped at [`MAX_TEXT_SIZE`].
    pub fn set_text(&mut self, text: Option<TextSpec>) {
        self.text = text.map(|spec| spec.clamped());
    }

    /// Compose the current state onto `base`.
    ///
    /// Sticker positions are kept within `[0, width] x [0, height]` of `base`.
    pub fn render(&self, base: &Raster) -> RenderOutput {
        let overlays: Vec<(&OverlayAsset, OverlayPlacement)> = self
            .selected
            .iter()
            .filter_map(|key| {
                let asset = self.assets.get(key)?;
                let placement = self.store.peek(key).copied().unwrap_or_default();
                Some((asset, placement.clamped_to(base.width, base.height)))
            })
            .collect();

        let mut warnings = Vec::new();
        let text = match &self.text {
            Some(spec) if !spec.content.is_empty() => {
                let (face, warning) = self.typefaces.resolve(spec.typeface.as_deref());
                warnings.extend(warning);
                Some((spec, face))
            }
            _ => None,
        };

        let image = render(base, self.filter, &overlays, text, self.text_anchor);
        RenderOutput { image, warnings }
    }

    /// Render and encode as a downloadable PNG.
    pub fn export(&self, base: &Raster) -> Result<ExportArtifact, SessionError> {
        let output = self.render(base);
        export(&output.image).map_err(SessionError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    fn catalog() -> Arc<AssetCatalog> {
        let mut assets = AssetCatalog::new(1.0);
        assets.insert_raster("heart", "Heart", Raster::filled_rgba(40, 40, [255, 0, 0, 255]));
        assets.insert_raster("hat", "Hat", Raster::filled_rgba(20, 20, [0, 0, 255, 255]));
        Arc::new(assets)
    }

    fn session() -> Session {
        Session::new(catalog(), Arc::new(TypefaceCatalog::new()), TextAnchor::default())
    }

    fn white(size: u32) -> Raster {
        Raster::filled_rgb(size, size, [255, 255, 255])
    }

    #[test]
    fn test_end_to_end_grayscale_heart() {
        let mut s = session();
        s.set_filter(FilterSelector::Grayscale);
        s.select("heart").unwrap();
        s.set_placement("heart", OverlayPlacement::new((100, 100), 1.0, 0.0))
            .unwrap();

        let out = s.render(&white(200));
        assert!(out.warnings.is_empty());
        assert_eq!(out.image.dimensions(), (200, 200));
        assert_eq!(out.image.get_rgba(100, 100), Some([255, 0, 0, 255]));
        assert_eq!(out.image.get_rgba(10, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_select_unknown_is_rejected() {
        let mut s = session();
        let err = s.select("unicorn").unwrap_err();
        assert!(matches!(err, SessionError::UnknownOverlay(ref k) if k == "unicorn"));
        assert!(s.selected().is_empty());
        assert!(s.placement("unicorn").is_err());
    }

    #[test]
    fn test_select_is_idempotent_and_ordered() {
        let mut s = session();
        s.select("hat").unwrap();
        s.select("heart").unwrap();
        s.select("hat").unwrap();
        assert_eq!(s.selected(), &["hat".to_string(), "heart".to_string()]);
    }

    #[test]
    fn test_select_creates_default_placement() {
        let mut s = session();
        s.select("heart").unwrap();
        assert_eq!(s.placement("heart").unwrap(), OverlayPlacement::default());
    }

    #[test]
    fn test_deselect_keeps_placement() {
        let mut s = session();
        s.select("heart").unwrap();
        s.set_placement("heart", OverlayPlacement::new((5, 6), 2.0, 10.0))
            .unwrap();
        assert!(s.deselect("heart"));
        assert!(!s.deselect("heart"));
        assert!(!s.is_selected("heart"));

        s.select("heart").unwrap();
        assert_eq!(s.placement("heart").unwrap().position, (5, 6));
    }

    #[test]
    fn test_set_placement_clamps() {
        let mut s = session();
        let stored = s
            .set_placement("hat", OverlayPlacement::new((0, 0), 9.0, -720.0))
            .unwrap();
        assert_eq!(stored.scale, 3.0);
        assert_eq!(stored.rotation, -180.0);
        assert_eq!(s.placement("hat").unwrap(), stored);
    }

    #[test]
    fn test_render_keeps_position_inside_base() {
        let mut s = session();
        s.select("hat").unwrap();
        // Stored as given; only the render pass bounds it to the image
        let stored = s
            .set_placement("hat", OverlayPlacement::new((500, -40), 1.0, 0.0))
            .unwrap();
        assert_eq!(stored.position, (500, -40));

        let out = s.render(&white(100));
        // 20x20 hat centred on the corner (100, 0)
        assert_eq!(out.image.get_rgba(95, 5), Some([0, 0, 255, 255]));
        assert_eq!(out.image.get_rgba(89, 5), Some([255, 255, 255, 255]));
        assert_eq!(out.image.get_rgba(95, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_set_text_caps_size() {
        let mut s = session();
        s.set_text(Some(TextSpec::new("Hi", u32::MAX, [0, 0, 0], (0, 0))));
        assert_eq!(s.text().unwrap().size, MAX_TEXT_SIZE);
        assert_eq!(s.render(&white(10)).image.dimensions(), (10, 10));
    }

    #[test]
    fn test_deselected_sticker_not_rendered() {
        let mut s = session();
        s.select("heart").unwrap();
        s.deselect("heart");
        let base = white(200);
        assert_eq!(s.render(&base).image, base.to_rgba());
    }

    #[test]
    fn test_unknown_typeface_falls_back_with_warning() {
        let mut s = session();
        s.set_text(Some(
            TextSpec::new("Hello", 16, [0, 0, 0], (10, 10)).with_typeface("Fancy"),
        ));
        let out = s.render(&white(100));
        assert_eq!(
            out.warnings,
            vec![CatalogWarning::MissingTypeface {
                name: "Fancy".to_string()
            }]
        );
        // Still drawn, with the default typeface
        assert!(out.image.get_rgba(10, 10) == Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_empty_text_skips_typeface_lookup() {
        let mut s = session();
        s.set_text(Some(TextSpec::new("", 16, [0, 0, 0], (0, 0)).with_typeface("Fancy")));
        assert!(s.render(&white(10)).warnings.is_empty());
    }

    #[test]
    fn test_export_round_trip() {
        let mut s = session();
        s.select("hat").unwrap();
        s.set_placement("hat", OverlayPlacement::new((10, 10), 1.0, 0.0))
            .unwrap();
        let base = white(30);

        let artifact = s.export(&base).unwrap();
        assert_eq!(artifact.file_name, "sticker_image.png");
        assert_eq!(artifact.mime_type, "image/png");

        let decoded = decode_image(&artifact.bytes).unwrap();
        assert_eq!(decoded, s.render(&base).image);
    }

    #[test]
    fn test_export_empty_base_fails() {
        let s = session();
        let err = s.export(&Raster::transparent(0, 0)).unwrap_err();
        assert!(matches!(err, SessionError::Encode(_)));
    }

    #[test]
    fn test_sessions_do_not_share_placements() {
        let assets = catalog();
        let faces = Arc::new(TypefaceCatalog::new());
        let mut a = Session::new(Arc::clone(&assets), Arc::clone(&faces), TextAnchor::default());
        let mut b = Session::new(assets, faces, TextAnchor::default());

        a.set_placement("heart", OverlayPlacement::new((1, 1), 1.0, 0.0))
            .unwrap();
        assert_eq!(b.placement("heart").unwrap(), OverlayPlacement::default());
    }

    #[test]
    fn test_catalog_mutation_does_not_leak_between_sessions() {
        let assets = catalog();
        let faces = Arc::new(TypefaceCatalog::new());
        let mut a = Session::new(Arc::clone(&assets), Arc::clone(&faces), TextAnchor::default());
        let b = Session::new(assets, faces, TextAnchor::default());

        a.assets_mut()
            .insert_raster("star", "Star", Raster::transparent(4, 4));
        a.typefaces_mut().insert("Pixel", crate::text::Typeface::Builtin);

        assert!(a.select("star").is_ok());
        assert!(!b.assets().contains("star"));
        assert!(b.typefaces().get("Pixel").is_none());
    }
}
