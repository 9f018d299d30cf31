//! PNG output for validated sprites.
//!
//! Converts sprites to PNG files with optional integer scaling.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{GovError, Result};
use crate::types::{Pixel, Sprite};

/// Largest output image, in pixels, that will be allocated (1 GiB of RGBA).
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

/// Output dimensions for `sprite` at `scale`, if they fit.
fn scaled_dimensions(sprite: &Sprite, scale: u32) -> Result<(u32, u32)> {
    let too_large = || GovError::Output {
        message: format!(
            "{}x{} sprite at scale {} is too large to render",
            sprite.width, sprite.height, scale
        ),
        help: Some("Use a smaller --scale".to_string()),
    };

    let width = u32::try_from(sprite.width)
        .ok()
        .and_then(|w| w.checked_mul(scale))
        .ok_or_else(too_large)?;
    let height = u32::try_from(sprite.height)
        .ok()
        .and_then(|h| h.checked_mul(scale))
        .ok_or_else(too_large)?;

    if u64::from(width) * u64::from(height) > MAX_OUTPUT_PIXELS {
        return Err(too_large());
    }
    Ok((width, height))
}

/// Convert a sprite to an RGBA image, upscaled by `scale`.
///
/// Fails when the scaled image would exceed [`MAX_OUTPUT_PIXELS`].
pub fn sprite_to_image(sprite: &Sprite, scale: u32) -> Result<RgbaImage> {
    let scale = scale.max(1);
    let (width, height) = scaled_dimensions(sprite, scale)?;
    let pixels = scale_pixels(&sprite.pixels, sprite.width, scale);

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let idx = y as usize * width as usize + x as usize;
        Rgba(pixels.get(idx).copied().unwrap_or_default().to_rgba())
    }))
}

/// Write a sprite to a PNG file.
///
/// # Arguments
///
/// * `sprite` - The sprite to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(sprite: &Sprite, path: &Path, scale: u32) -> Result<()> {
    let img = sprite_to_image(sprite, scale)?;

    img.save(path).map_err(|e| GovError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Scale a row-major pixel buffer by an integer factor.
///
/// Uses nearest-neighbour scaling for crisp pixel art.
pub fn scale_pixels(pixels: &[Pixel], width: usize, scale: u32) -> Vec<Pixel> {
    if scale <= 1 || width == 0 {
        return pixels.to_vec();
    }

    let scale = scale as usize;
    let mut scaled = Vec::with_capacity(pixels.len() * scale * scale);

    for row in pixels.chunks(width) {
        let mut wide = Vec::with_capacity(width * scale);
        for &p in row {
            wide.extend(std::iter::repeat(p).take(scale));
        }
        // Short trailing rows are padded so every scaled row is full width.
        wide.resize(width * scale, Pixel::Transparent);
        for _ in 0..scale {
            scaled.extend_from_slice(&wide);
        }
    }

    scaled
}
