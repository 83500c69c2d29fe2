/// RGBA colour representation and the shared colour-distance utility
use serde::{Deserialize, Serialize};

use crate::constants::TRANSPARENT_ALPHA;

/// A colour with four 8-bit channels, matching the `[r, g, b, a]` arrays
/// used by the block data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Manhattan distance over all four channels, alpha included.
    /// An opaque query colour is therefore biased toward opaque blocks.
    pub fn distance(self, other: Self) -> u32 {
        let d = |a: u8, b: u8| (a as i32 - b as i32).unsigned_abs();
        d(self.red, other.red)
            + d(self.green, other.green)
            + d(self.blue, other.blue)
            + d(self.alpha, other.alpha)
    }

    pub fn is_transparent(self) -> bool {
        self.alpha == TRANSPARENT_ALPHA
    }

    /// ITU-R 601 luma of the colour channels, alpha untouched.
    pub fn luma(self) -> Self {
        let gray = ((299 * self.red as u32 + 587 * self.green as u32 + 114 * self.blue as u32)
            / 1000) as u8;
        Self::new(gray, gray, gray, self.alpha)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.red, c.green, c.blue, c.alpha]
    }
}
