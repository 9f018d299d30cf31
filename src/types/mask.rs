//! Segmentation masks at their native resolution.

use crate::error::{GovError, Result};

/// A boolean foreground grid produced by an external segmentation pass.
///
/// The mask keeps its own resolution; callers resample it against the
/// sprite only when the sprite's dimensions are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl ParsedMask {
    /// Create a mask from row-major foreground flags.
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(GovError::Parse {
                message: format!(
                    "Mask has {} cells but dimensions are {}x{}",
                    cells.len(),
                    width,
                    height
                ),
                help: None,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// A mask with no cells.
    pub fn empty() -> Self {
        Self::from_parts(0, 0, Vec::new())
    }

    pub(crate) fn from_parts(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Create a mask from per-pixel alpha (or coverage) values.
    ///
    /// A cell is foreground when its value is at least `threshold`.
    pub fn from_alpha(width: usize, height: usize, alpha: &[u8], threshold: u8) -> Result<Self> {
        Self::new(width, height, alpha.iter().map(|&a| a >= threshold).collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the mask has no cells to sample from.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Foreground flag at native coordinates. Out of range reads as background.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }
}
