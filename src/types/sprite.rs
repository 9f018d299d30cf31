//! Raw and validated sprite values.

use serde::{Deserialize, Serialize};

use super::{Palette, Pixel};

/// A sprite as delivered by the decoder, before validation.
///
/// `palette` is whatever the producer claimed; validation may replace it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSprite {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub pixels: Vec<Pixel>,
    #[serde(default)]
    pub palette: Palette,
}

impl RawSprite {
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Self {
        Self {
            width,
            height,
            pixels,
            palette: Palette::new(),
        }
    }

    /// Number of pixels the declared dimensions call for.
    pub fn expected_len(&self) -> usize {
        self.width.saturating_mul(self.height)
    }
}

/// A validated sprite: every pixel is transparent or a member of `palette`,
/// and `pixels.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Pixel>,
    pub palette: Palette,
}

impl Sprite {
    /// Pixel at (x, y), or `None` outside the sprite.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Number of non-transparent pixels.
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_transparent()).count()
    }
}
