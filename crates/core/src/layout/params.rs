//! Grid layout parameters.
//!
//! Contains GridParams struct for controlling the size of the output grid.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Default number of character columns in the output grid.
pub const DEFAULT_GRID_WIDTH: usize = 120;

/// Default number of rows in the output grid.
pub const DEFAULT_GRID_HEIGHT: usize = 60;

/// Largest grid accepted, in cells.
///
/// Grids are allocated up front, so sizes past this are rejected instead of
/// attempting a multi-gigabyte allocation.
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// Parameters for grid composition.
///
/// Controls the dimensions of the character grid words are projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridParams {
    /// Number of character columns. Each output line is at most this wide.
    pub width: usize,

    /// Number of rows. The output always has exactly this many lines.
    pub height: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl GridParams {
    /// Creates grid parameters with the specified dimensions.
    ///
    /// # Errors
    /// Returns `GridError::InvalidGrid` if either dimension is zero or the
    /// grid would exceed [`MAX_GRID_CELLS`].
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let params = Self { width, height };
        params.validate()?;
        Ok(params)
    }

    /// Checks that both dimensions are positive and the cell count fits
    /// within [`MAX_GRID_CELLS`].
    pub fn validate(&self) -> Result<()> {
        self.cell_count().map(|_| ())
    }

    /// Total number of cells in a grid of this size.
    ///
    /// # Errors
    /// Returns `GridError::InvalidGrid` for the same sizes `validate` rejects.
    pub fn cell_count(&self) -> Result<usize> {
        match self.width.checked_mul(self.height) {
            Some(cells) if cells > 0 && cells <= MAX_GRID_CELLS => Ok(cells),
            _ => Err(GridError::InvalidGrid {
                width: self.width,
                height: self.height,
            }),
        }
    }
}
