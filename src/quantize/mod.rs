//! Palette quantization and snapping.

mod distance;
mod quantizer;
mod snap;

pub use distance::{
    euclidean_distance, euclidean_distance_sq, min_pairwise_distance, perceptual_distance,
};
pub use quantizer::{
    quantize, quantize_histogram, ColourHistogram, QuantizeOptions, DEFAULT_MAX_COLORS,
    DEFAULT_POPULAR_RATIO, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use snap::{snap, snap_all, snap_colour};
