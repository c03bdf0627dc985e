//! Text Converter - outputs the grid as plain text.

use std::io::Write;

use crate::error::Result;
use crate::layout::TextGrid;

/// Text Converter - writes one line per grid row.
///
/// Each row is right-trimmed and terminated by `\n`. Blank rows are still
/// written as empty lines, so the output always has exactly `height` lines.
pub struct TextConverter<'a, W: Write> {
    /// Output writer
    outfp: &'a mut W,
    /// Number of grids written so far
    grids: usize,
}

impl<'a, W: Write> TextConverter<'a, W> {
    /// Create a new text converter.
    pub fn new(outfp: &'a mut W) -> Self {
        Self { outfp, grids: 0 }
    }

    /// Number of grids rendered by this converter.
    pub fn grids_written(&self) -> usize {
        self.grids
    }

    /// Write text to output.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.outfp.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Receive and render a finished grid.
    pub fn receive_grid(&mut self, grid: &TextGrid) -> Result<()> {
        for line in grid.lines() {
            self.write_text(&line)?;
            self.write_text("\n")?;
        }
        self.grids += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn close(&mut self) -> Result<()> {
        self.outfp.flush()?;
        Ok(())
    }
}
