//! Per-session transform parameters for each overlay.
//!
//! The store is a plain table owned by one [`Session`](crate::session::Session).
//! Entries are created with defaults the first time a key is read and are
//! overwritten wholesale by the caller. Keys never interact.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Smallest accepted scale factor.
pub const MIN_SCALE: f32 = 0.5;
/// Largest accepted scale factor.
pub const MAX_SCALE: f32 = 3.0;
/// Rotation range in degrees, symmetric around zero.
pub const MAX_ROTATION: f32 = 180.0;

/// Where an overlay sits and how it is transformed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayPlacement {
    /// Visual centre of the overlay in base-image pixels.
    pub position: (i32, i32),
    /// Uniform scale factor (0.5 to 3.0)
    pub scale: f32,
    /// Rotation in degrees, counter-clockwise (-180 to 180)
    pub rotation: f32,
}

impl Default for OverlayPlacement {
    fn default() -> Self {
        Self {
            position: (100, 100),
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl OverlayPlacement {
    pub fn new(position: (i32, i32), scale: f32, rotation: f32) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    /// Clamp scale and rotation into their accepted ranges.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let scale = if self.scale.is_finite() {
            self.scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            defaults.scale
        };
        let rotation = if self.rotation.is_finite() {
            self.rotation.clamp(-MAX_ROTATION, MAX_ROTATION)
        } else {
            defaults.rotation
        };
        Self {
            position: self.position,
            scale,
            rotation,
        }
    }

    /// [`clamped`](Self::clamped), plus position kept within `[0, width] x [0, height]`.
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        let clamped = self.clamped();
        let max_x = i32::try_from(width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            position: (
                clamped.position.0.clamp(0, max_x),
                clamped.position.1.clamp(0, max_y),
            ),
            ..clamped
        }
    }

    /// True when every field is within its accepted range.
    pub fn is_valid(&self) -> bool {
        *self == self.clamped()
    }
}

/// Table of placements keyed by overlay key.
#[derive(Debug, Clone, Default)]
pub struct TransformStore {
    entries: HashMap<String, OverlayPlacement>,
}

impl TransformStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current placement for `key`, creating the default entry on first access.
    pub fn get(&mut self, key: &str) -> OverlayPlacement {
        *self.entries.entry(key.to_string()).or_default()
    }

    /// Read without creating an entry.
    pub fn peek(&self, key: &str) -> Option<&OverlayPlacement> {
        self.entries.get(key)
    }

    /// Overwrite the placement for `key`.
    pub fn set(&mut self, key: &str, placement: OverlayPlacement) {
        self.entries.insert(key.to_string(), placement);
    }

    pub fn remove(&mut self, key: &str) -> Option<OverlayPlacement> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: clamping always yields a valid placement, and is idempotent.
        #[test]
        fn prop_clamped_is_valid(
            x in any::<i32>(),
            y in any::<i32>(),
            scale in -10.0f32..10.0,
            rotation in -1000.0f32..1000.0,
        ) {
            let p = OverlayPlacement::new((x, y), scale, rotation).clamped();
            prop_assert!(p.is_valid());
            prop_assert_eq!(p.clamped(), p);
            prop_assert_eq!(p.position, (x, y));
        }

        /// Property: set then get returns exactly what was stored.
        #[test]
        fn prop_set_get_round_trip(
            key in "[a-z]{1,8}",
            x in -500i32..500,
            y in -500i32..500,
            scale in 0.5f32..=3.0,
            rotation in -180.0f32..=180.0,
        ) {
            let mut store = TransformStore::new();
            let p = OverlayPlacement::new((x, y), scale, rotation);
            store.set(&key, p);
            prop_assert_eq!(store.get(&key), p);
            prop_assert_eq!(store.len(), 1);
        }
    }
}
