//! Chroma-key background removal with optional mask guidance.

use crate::quantize::{euclidean_distance, min_pairwise_distance};
use crate::types::{Colour, Palette, ParsedMask, Pixel};
use crate::validation::{codes, Diagnostic, NullObserver, Observer};

/// Tolerance used when no palette-specific distance is available.
pub const DEFAULT_CHROMA_TOLERANCE: f64 = 40.0;

/// A background reference colour plus the distance within which a pixel
/// counts as background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaKey {
    pub colour: Colour,
    pub tolerance: f64,
}

impl ChromaKey {
    pub fn new(colour: Colour, tolerance: f64) -> Self {
        Self { colour, tolerance }
    }

    /// Key tuned to a palette: tolerance is half the palette's smallest
    /// inter-colour distance, so keying cannot swallow a palette colour
    /// that sits near the key.
    ///
    /// Palettes with fewer than two colours fall back to
    /// [`DEFAULT_CHROMA_TOLERANCE`].
    pub fn for_palette(colour: Colour, palette: &Palette) -> Self {
        let tolerance = min_pairwise_distance(palette.as_slice())
            .map_or(DEFAULT_CHROMA_TOLERANCE, |d| d / 2.0);
        Self { colour, tolerance }
    }

    /// True if `colour` is within tolerance of the key.
    pub fn matches(&self, colour: Colour) -> bool {
        euclidean_distance(colour, self.colour) <= self.tolerance
    }
}

impl Default for ChromaKey {
    fn default() -> Self {
        Self::new(Colour::MAGENTA, DEFAULT_CHROMA_TOLERANCE)
    }
}

/// Replace background pixels with transparent.
///
/// See [`extract_background_with`].
pub fn extract_background(
    pixels: &[Pixel],
    width: usize,
    height: usize,
    key: &ChromaKey,
    mask: Option<&ParsedMask>,
) -> Vec<Pixel> {
    extract_background_with(pixels, width, height, key, mask, &mut NullObserver)
}

/// Replace background pixels with transparent, reporting to `observer`.
///
/// Where the mask marks a pixel as foreground it is kept, even if its
/// colour is within the key's tolerance. Everywhere else (mask background,
/// or no usable mask) a pixel is background when it is within tolerance of
/// the key. The mask is sampled nearest-neighbour against `width x height`.
pub fn extract_background_with(
    pixels: &[Pixel],
    width: usize,
    height: usize,
    key: &ChromaKey,
    mask: Option<&ParsedMask>,
    observer: &mut dyn Observer,
) -> Vec<Pixel> {
    let mask = match mask {
        Some(m) if m.is_empty() || width == 0 || height == 0 => {
            observer.observe(
                Diagnostic::warning(
                    codes::MASK_UNUSABLE,
                    "segmentation mask cannot be sampled; using colour-only background removal",
                )
                .with_help("Regenerate the mask or drop it"),
            );
            None
        }
        other => other,
    };

    let mut removed = 0usize;
    let mut protected = 0usize;

    let out = pixels
        .iter()
        .enumerate()
        .map(|(i, &pixel)| {
            let Pixel::Opaque(colour) = pixel else {
                return Pixel::Transparent;
            };

            let keyed = key.matches(colour);
            if let Some(mask) = mask {
                if mask.sample_at(width, height, i % width, i / width) {
                    if keyed {
                        protected += 1;
                    }
                    return pixel;
                }
            }

            if keyed {
                removed += 1;
                Pixel::Transparent
            } else {
                pixel
            }
        })
        .collect();

    let mut message = format!("removed {} background pixels", removed);
    if protected > 0 {
        message.push_str(&format!(", kept {} key-coloured foreground pixels", protected));
    }
    observer.observe(Diagnostic::info(codes::BACKGROUND_REMOVED, message));

    out
}
