//! Nearest-neighbour mask resampling.
//!
//! Segmentation masks arrive at whatever resolution the vision model
//! produced. They are only ever resampled nearest-neighbour, at the point of
//! use: any smoothing would blur the foreground edge and bring back the
//! anti-aliasing that pixel-perfect output has to strip.

use crate::types::ParsedMask;

/// Map a target coordinate onto a source axis of `source_len` cells.
///
/// `floor(target * source_len / target_len)`, in exact integer arithmetic,
/// clamped to the last source cell.
fn source_index(target: usize, target_len: usize, source_len: usize) -> usize {
    let scaled = (target as u64 * source_len as u64) / target_len as u64;
    (scaled as usize).min(source_len - 1)
}

impl ParsedMask {
    /// Sample the mask as if it had been resized to `target_width x target_height`.
    ///
    /// Returns false (background) when either the mask or the target is empty.
    pub fn sample_at(&self, target_width: usize, target_height: usize, x: usize, y: usize) -> bool {
        if self.is_empty() || target_width == 0 || target_height == 0 {
            return false;
        }
        let sx = source_index(x, target_width, self.width());
        let sy = source_index(y, target_height, self.height());
        self.get(sx, sy)
    }
}

/// Resample a mask to the target resolution.
pub fn resample(mask: &ParsedMask, target_width: usize, target_height: usize) -> ParsedMask {
    if mask.is_empty() || target_width == 0 || target_height == 0 {
        return ParsedMask::empty();
    }

    if mask.width() == target_width && mask.height() == target_height {
        return mask.clone();
    }

    let mut cells = Vec::with_capacity(target_width * target_height);
    for y in 0..target_height {
        let sy = source_index(y, target_height, mask.height());
        for x in 0..target_width {
            let sx = source_index(x, target_width, mask.width());
            cells.push(mask.cells()[sy * mask.width() + sx]);
        }
    }

    ParsedMask::from_parts(target_width, target_height, cells)
}
