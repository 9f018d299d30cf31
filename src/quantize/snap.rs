//! Nearest-colour snapping against a fixed palette.

use crate::types::{Colour, Palette, Pixel};

use super::distance::euclidean_distance_sq;

/// Snap a pixel to its nearest palette colour.
///
/// Transparent pixels are never snapped, and an empty palette leaves the
/// pixel untouched.
pub fn snap(pixel: Pixel, palette: &Palette) -> Pixel {
    match pixel {
        Pixel::Transparent => Pixel::Transparent,
        Pixel::Opaque(colour) => Pixel::Opaque(snap_colour(colour, palette)),
    }
}

/// Snap a colour to its nearest palette colour by Euclidean RGB distance.
///
/// Members are returned as-is. Ties go to the earliest palette entry.
pub fn snap_colour(colour: Colour, palette: &Palette) -> Colour {
    if palette.is_empty() || palette.contains(colour) {
        return colour;
    }

    let mut best = colour;
    let mut best_dist = u32::MAX;

    for candidate in palette.iter() {
        let dist = euclidean_distance_sq(colour, candidate);
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }

    best
}

/// Snap every pixel in a buffer.
pub fn snap_all(pixels: &[Pixel], palette: &Palette) -> Vec<Pixel> {
    pixels.iter().map(|&p| snap(p, palette)).collect()
}
