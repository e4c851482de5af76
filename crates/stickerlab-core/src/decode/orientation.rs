//! EXIF orientation handling.
//!
//! Cameras store pixels in sensor order and record how to turn them upright
//! in the EXIF `Orientation` tag. Every tag value decomposes into a number of
//! clockwise quarter turns followed by an optional horizontal mirror.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// EXIF orientation tag, values 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    Transpose = 5,
    Rotate90CW = 6,
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Map a raw tag value. Out-of-range values are treated as upright.
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }

    /// Clockwise quarter turns and whether to mirror afterwards.
    fn correction(self) -> (u8, bool) {
        match self {
            Orientation::Normal => (0, false),
            Orientation::FlipHorizontal => (0, true),
            Orientation::Rotate180 => (2, false),
            Orientation::FlipVertical => (2, true),
            Orientation::Transpose => (1, true),
            Orientation::Rotate90CW => (1, false),
            Orientation::Transverse => (3, true),
            Orientation::Rotate270CW => (3, false),
        }
    }

    /// True when the upright image has width and height exchanged.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        self.correction().0 % 2 == 1
    }

    /// Turn a decoded image upright.
    pub(crate) fn apply(self, img: DynamicImage) -> DynamicImage {
        let (turns, mirror) = self.correction();
        let turned = match turns {
            1 => img.rotate90(),
            2 => img.rotate180(),
            3 => img.rotate270(),
            _ => img,
        };
        if mirror {
            turned.fliph()
        } else {
            turned
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        Self::from_exif(value)
    }
}
