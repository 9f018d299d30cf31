//! End-to-end governance: background removal followed by validation.

use crate::extract::{extract_background_with, ChromaKey};
use crate::quantize::QuantizeOptions;
use crate::types::{Palette, ParsedMask, RawSprite, Sprite};
use crate::validation::{validate_sprite_with, NullObserver, Observer};

/// Settings for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Quantizer settings for auto palettes.
    pub quantize: QuantizeOptions,
    /// Background key. `None` skips background removal.
    pub chroma: Option<ChromaKey>,
    /// Locked palette. Empty or `None` means auto-quantize.
    pub locked: Option<Palette>,
}

/// Run the full pipeline on a decoded image.
pub fn govern(raw: RawSprite, mask: Option<&ParsedMask>, options: &PipelineOptions) -> Sprite {
    govern_with(raw, mask, options, &mut NullObserver)
}

/// Run the full pipeline, reporting diagnostics to `observer`.
///
/// The mask is resampled against the raw sprite's declared dimensions.
pub fn govern_with(
    mut raw: RawSprite,
    mask: Option<&ParsedMask>,
    options: &PipelineOptions,
    observer: &mut dyn Observer,
) -> Sprite {
    if let Some(key) = &options.chroma {
        raw.pixels =
            extract_background_with(&raw.pixels, raw.width, raw.height, key, mask, observer);
    }

    validate_sprite_with(raw, options.locked.as_ref(), &options.quantize, observer)
}
