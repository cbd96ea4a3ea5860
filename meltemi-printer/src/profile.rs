//! Paper profiles for common thermal printer widths
//!
//! A profile fixes the character grid used by the text path and the
//! pixel grid used by the raster path. All supported widths are exact
//! multiples of 8 pixels, so bit-packed rows never need padding.

use serde::{Deserialize, Serialize};

/// Static paper geometry for one roll width at 203 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperProfile {
    /// Roll width in millimeters (58, 80 or 112)
    pub size_mm: u16,
    /// Printable width in character cells (Font A)
    pub char_width: usize,
    /// Printable width in pixels
    pub pixel_width: usize,
}

impl PaperProfile {
    /// 58mm roll: 32 characters, 384 pixels
    pub const MM58: PaperProfile = PaperProfile {
        size_mm: 58,
        char_width: 32,
        pixel_width: 384,
    };

    /// 80mm roll: 48 characters, 576 pixels
    pub const MM80: PaperProfile = PaperProfile {
        size_mm: 80,
        char_width: 48,
        pixel_width: 576,
    };

    /// 112mm roll: 64 characters, 832 pixels
    pub const MM112: PaperProfile = PaperProfile {
        size_mm: 112,
        char_width: 64,
        pixel_width: 832,
    };

    /// Look up a profile by roll width in millimeters
    pub fn from_mm(size_mm: u16) -> Option<PaperProfile> {
        match size_mm {
            58 => Some(Self::MM58),
            80 => Some(Self::MM80),
            112 => Some(Self::MM112),
            _ => None,
        }
    }

    /// Bytes per packed raster row
    pub fn bytes_per_row(&self) -> usize {
        self.pixel_width / 8
    }
}

impl Default for PaperProfile {
    fn default() -> Self {
        Self::MM80
    }
}
