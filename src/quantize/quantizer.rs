//! Frequency-priority palette quantization.
//!
//! Keeps the most frequent colours unconditionally, then spends the rest
//! of the budget on colours that are perceptually distinct from everything
//! already kept. Minority hues survive where a plain top-N cut would drop
//! them.

use std::collections::HashMap;

use crate::types::{Colour, Palette, Pixel};

use super::distance::perceptual_distance;

/// Default colour budget for auto-quantized palettes.
pub const DEFAULT_MAX_COLORS: usize = 64;

/// Default share of the budget given to the most frequent colours.
pub const DEFAULT_POPULAR_RATIO: f64 = 0.7;

/// Default perceptual distance a rare colour must exceed to be admitted.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 30.0;

/// Tunables for [`quantize`].
///
/// The defaults must stay as they are for existing sprites to re-quantize
/// to the same palettes.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeOptions {
    pub max_colors: usize,
    pub popular_ratio: f64,
    pub similarity_threshold: f64,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            popular_ratio: DEFAULT_POPULAR_RATIO,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl QuantizeOptions {
    /// Default options with a different colour budget.
    pub fn with_max_colors(max_colors: usize) -> Self {
        Self {
            max_colors,
            ..Self::default()
        }
    }

    /// Number of palette slots reserved for the most frequent colours.
    pub fn popular_count(&self) -> usize {
        let ratio = self.popular_ratio.clamp(0.0, 1.0);
        ((self.max_colors as f64 * ratio).floor() as usize).min(self.max_colors)
    }
}

/// Colour counts in first-seen order.
#[derive(Debug, Default)]
pub struct ColourHistogram {
    entries: Vec<(Colour, usize)>,
    index: HashMap<Colour, usize>,
}

impl ColourHistogram {
    /// Count every opaque pixel.
    pub fn from_pixels(pixels: &[Pixel]) -> Self {
        let mut histogram = Self::default();
        for colour in pixels.iter().filter_map(|p| p.colour()) {
            histogram.add(colour);
        }
        histogram
    }

    pub fn add(&mut self, colour: Colour) {
        match self.index.get(&colour) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(colour, self.entries.len());
                self.entries.push((colour, 1));
            }
        }
    }

    /// Number of distinct colours.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, colour: Colour) -> usize {
        self.index.get(&colour).map_or(0, |&i| self.entries[i].1)
    }

    /// Colours by descending count; ties keep first-seen order.
    pub fn by_frequency(&self) -> Vec<(Colour, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

/// Reduce the opaque colours in `pixels` to at most `options.max_colors`.
///
/// Transparent pixels are ignored. The result is ordered popular-first,
/// then admitted rare colours in frequency order.
pub fn quantize(pixels: &[Pixel], options: &QuantizeOptions) -> Palette {
    let histogram = ColourHistogram::from_pixels(pixels);
    quantize_histogram(&histogram, options)
}

/// [`quantize`] over an existing histogram.
pub fn quantize_histogram(histogram: &ColourHistogram, options: &QuantizeOptions) -> Palette {
    let max = options.max_colors;
    if max == 0 || histogram.is_empty() {
        return Palette::new();
    }

    let sorted = histogram.by_frequency();

    if sorted.len() <= max {
        return sorted.into_iter().map(|(c, _)| c).collect();
    }

    let popular = options.popular_count();
    let mut kept: Vec<Colour> = sorted.iter().take(popular).map(|&(c, _)| c).collect();

    for &(candidate, _) in &sorted[popular..] {
        if kept.len() >= max {
            break;
        }
        let distinct = kept
            .iter()
            .all(|&k| perceptual_distance(candidate, k) > options.similarity_threshold);
        if distinct {
            kept.push(candidate);
        }
    }

    Palette::from_colours(kept)
}
