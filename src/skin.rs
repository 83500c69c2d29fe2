/// Skin texture loading and pixel access
use std::path::Path;

use thiserror::Error;

use crate::color::Rgba;
use crate::constants::{SKIN_HEIGHT, SKIN_WIDTH};

#[derive(Debug, Error)]
pub enum SkinError {
    #[error("failed to open skin image: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid skin dimensions: {width}x{height}, expected {SKIN_WIDTH}x{SKIN_HEIGHT}")]
    Dimensions { width: u32, height: u32 },
}

/// Source skin texture, stored row-major as RGBA pixels.
pub struct Skin {
    pixels: Vec<Rgba>,
}

impl Skin {
    /// Load a skin texture and validate its dimensions.
    pub fn from_file(path: &Path) -> Result<Self, SkinError> {
        let img = image::open(path)?.to_rgba8();
        if img.width() != SKIN_WIDTH || img.height() != SKIN_HEIGHT {
            return Err(SkinError::Dimensions {
                width: img.width(),
                height: img.height(),
            });
        }

        let pixels = img
            .pixels()
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Self { pixels })
    }

    pub fn from_pixels(pixels: Vec<Rgba>) -> Self {
        Self { pixels }
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at a row-major index, `None` when out of range.
    pub fn pixel(&self, index: usize) -> Option<Rgba> {
        self.pixels.get(index).copied()
    }

    /// Convert every pixel to its luma, keeping alpha intact.
    pub fn grayscale(&mut self) {
        for pixel in &mut self.pixels {
            *pixel = pixel.luma();
        }
    }
}
