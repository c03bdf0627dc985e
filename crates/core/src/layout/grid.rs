//! Fixed-size character grid.
//!
//! `TextGrid` is the mutable target of one composition run. Its dimensions
//! never change after construction, and writes that fall outside it are
//! dropped instead of resizing or wrapping.

use std::fmt;

use crate::error::Result;
use crate::layout::params::GridParams;

/// Character stored in cells nothing has been written to.
pub const BLANK: char = ' ';

/// A single pending write into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: i64,
    pub col: i64,
    pub ch: char,
}

/// A `rows x cols` array of characters, initialized to blanks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl TextGrid {
    /// Creates a blank grid.
    ///
    /// # Errors
    /// Returns `GridError::InvalidGrid` if either dimension is zero or the
    /// grid is larger than `MAX_GRID_CELLS`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::with_params(&GridParams::new(width, height)?)
    }

    /// Creates a blank grid sized by `params`.
    pub fn with_params(params: &GridParams) -> Result<Self> {
        let cells = params.cell_count()?;
        Ok(Self {
            width: params.width,
            height: params.height,
            cells: vec![BLANK; cells],
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: i64, col: i64) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    /// Writes `ch` at `(row, col)`, overwriting whatever was there.
    ///
    /// Returns false and leaves the grid untouched when the cell lies outside
    /// `[0, height) x [0, width)`, including negative coordinates.
    pub fn put(&mut self, row: i64, col: i64, ch: char) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = ch;
                true
            }
            None => false,
        }
    }

    /// Applies a pending write. See [`TextGrid::put`].
    #[inline]
    pub fn apply(&mut self, cell: Cell) -> bool {
        self.put(cell.row, cell.col, cell.ch)
    }

    /// Returns the character at `(row, col)`, or None if out of bounds.
    pub fn get(&self, row: i64, col: i64) -> Option<char> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Returns one row of cells.
    pub fn row(&self, row: usize) -> Option<&[char]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterates over all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width)
    }

    /// Returns row `row` as a string with trailing whitespace removed.
    ///
    /// Leading and interior blanks are kept; a blank row becomes "".
    pub fn line(&self, row: usize) -> Option<String> {
        self.row(row).map(trimmed_line)
    }

    /// Iterates over every row as a right-trimmed string.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().map(trimmed_line)
    }

    /// Whether no cell has been written with a non-blank character.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == BLANK)
    }

    /// Number of non-blank cells.
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != BLANK).count()
    }

    /// Serializes the grid: one right-trimmed, newline-terminated line per row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for TextGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn trimmed_line(cells: &[char]) -> String {
    let mut line: String = cells.iter().collect();
    line.truncate(line.trim_end().len());
    line
}
