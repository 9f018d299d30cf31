//! Background extraction and mask resampling.

mod background;
mod mask;

pub use background::{
    extract_background, extract_background_with, ChromaKey, DEFAULT_CHROMA_TOLERANCE,
};
pub use mask::resample;
