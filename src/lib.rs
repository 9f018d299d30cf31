//! pxgov - Palette governance for generated pixel art
//!
//! A library for turning noisy generated images into clean sprites: the
//! background is keyed out (optionally guided by a segmentation mask), the
//! colours are reduced to a small palette or a locked one, and every pixel
//! is snapped onto that palette.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod quantize;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{load_manifest, Manifest, ScanResult};
pub use error::{GovError, Result};
pub use extract::{extract_background, resample, ChromaKey};
pub use pipeline::{govern, govern_with, PipelineOptions};
pub use quantize::{perceptual_distance, quantize, snap, QuantizeOptions};
pub use render::{scale_pixels, sprite_to_json, write_png};
pub use types::{Colour, Palette, ParsedMask, Pixel, RawSprite, Sprite};
pub use validation::{validate_sprite, Diagnostic, Observer, Severity, ValidationResult};
