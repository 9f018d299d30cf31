//! Sprite validation: length repair, palette selection, and snapping.
//!
//! This is the last stage of the pipeline. It never fails: whatever the
//! decoder hands over, a well-formed [`Sprite`] comes out.

pub mod observer;
mod warning;

pub use observer::{codes, NullObserver, Observer};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::quantize::{quantize_histogram, snap_all, ColourHistogram, QuantizeOptions};
use crate::types::{Palette, Pixel, RawSprite, Sprite};

/// Validate a raw sprite, discarding diagnostics.
pub fn validate_sprite(
    raw: RawSprite,
    locked: Option<&Palette>,
    options: &QuantizeOptions,
) -> Sprite {
    validate_sprite_with(raw, locked, options, &mut NullObserver)
}

/// Validate a raw sprite, reporting what was repaired to `observer`.
///
/// A non-empty `locked` palette is used verbatim; otherwise the palette is
/// quantized from the (repaired) pixels. Every pixel is then snapped to the
/// selected palette, which is the palette returned.
pub fn validate_sprite_with(
    raw: RawSprite,
    locked: Option<&Palette>,
    options: &QuantizeOptions,
    observer: &mut dyn Observer,
) -> Sprite {
    let expected = raw.expected_len();
    let RawSprite {
        width,
        height,
        pixels,
        ..
    } = raw;

    let pixels = repair_length(pixels, expected, observer);

    let palette = match locked {
        Some(locked) if !locked.is_empty() => {
            observer.observe(Diagnostic::info(
                codes::PALETTE_LOCKED,
                format!("using locked palette of {} colours", locked.len()),
            ));
            locked.clone()
        }
        _ => {
            let histogram = ColourHistogram::from_pixels(&pixels);
            let unique = histogram.len();
            let palette = quantize_histogram(&histogram, options);
            if palette.len() < unique {
                observer.observe(Diagnostic::info(
                    codes::PALETTE_REDUCED,
                    format!("palette reduced from {} to {} colours", unique, palette.len()),
                ));
            }
            palette
        }
    };

    let pixels = snap_all(&pixels, &palette);

    Sprite {
        width,
        height,
        pixels,
        palette,
    }
}

/// Truncate or pad `pixels` with transparent to exactly `expected` entries.
pub fn repair_length(
    mut pixels: Vec<Pixel>,
    expected: usize,
    observer: &mut dyn Observer,
) -> Vec<Pixel> {
    let actual = pixels.len();
    if actual == expected {
        return pixels;
    }

    let action = if actual > expected {
        "truncated"
    } else {
        "padded"
    };
    observer.observe(
        Diagnostic::warning(
            codes::LENGTH_REPAIR,
            format!(
                "pixel array has {} entries, expected {}; {} to fit",
                actual, expected, action
            ),
        )
        .with_help("The decoder produced a buffer that does not match the declared dimensions"),
    );

    pixels.resize(expected, Pixel::Transparent);
    pixels
}
