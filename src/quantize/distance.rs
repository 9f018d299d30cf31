//! Colour distance metrics.
//!
//! Two metrics are used on purpose. Quantization merges colours once per
//! image and uses the red-mean weighted metric from
//! <https://www.compuphase.com/cmetric.htm>. Snapping and chroma keying run
//! per pixel and use plain Euclidean RGB distance.

use crate::types::Colour;

/// Red-mean weighted RGB distance.
///
/// Green is weighted 4x; red and blue weights shift with the mean red
/// value of the two colours. Not a symmetric Euclidean metric in RGB.
pub fn perceptual_distance(a: Colour, b: Colour) -> f64 {
    let r_mean = (a.r as f64 + b.r as f64) / 2.0;
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;

    let r_weight = 2.0 + r_mean / 256.0;
    let g_weight = 4.0;
    let b_weight = 2.0 + (255.0 - r_mean) / 256.0;

    (r_weight * dr * dr + g_weight * dg * dg + b_weight * db * db).sqrt()
}

/// Plain Euclidean RGB distance.
pub fn euclidean_distance(a: Colour, b: Colour) -> f64 {
    (euclidean_distance_sq(a, b) as f64).sqrt()
}

/// Squared Euclidean RGB distance. Orders the same as [`euclidean_distance`].
pub fn euclidean_distance_sq(a: Colour, b: Colour) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Smallest Euclidean distance between any two colours, if there are two.
pub fn min_pairwise_distance(colours: &[Colour]) -> Option<f64> {
    let mut best: Option<u32> = None;
    for (i, &a) in colours.iter().enumerate() {
        for &b in &colours[i + 1..] {
            let d = euclidean_distance_sq(a, b);
            best = Some(best.map_or(d, |cur| cur.min(d)));
        }
    }
    best.map(|d| (d as f64).sqrt())
}
