//! Builder pattern for grid rendering.
//!
//! Provides a fluent API for configuring and executing a composition.
//!
//! # Example
//! ```ignore
//! use gridscribe_core::api::GridBuilder;
//!
//! let text = GridBuilder::new(SourceFrame::new(1000, 500)?)
//!     .width(80)
//!     .height(40)
//!     .parallel(4)
//!     .render(&words)?;
//! ```

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::geometry::SourceFrame;
use crate::layout::{GridParams, TextGrid};
use crate::ocr::OcrWord;

use super::high_level::{ComposeOptions, compose_grid, render_text_to_fp, write_text_file};

/// A builder for configuring grid rendering.
///
/// This provides a fluent API that wraps the underlying `ComposeOptions`
/// and rendering functions.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    frame: SourceFrame,
    params: GridParams,
    threads: Option<usize>,
}

impl GridBuilder {
    /// Creates a new GridBuilder for words measured in `frame`.
    pub fn new(frame: SourceFrame) -> Self {
        Self {
            frame,
            params: GridParams::default(),
            threads: None,
        }
    }

    /// Sets the number of grid columns.
    pub fn width(mut self, width: usize) -> Self {
        self.params.width = width;
        self
    }

    /// Sets the number of grid rows.
    pub fn height(mut self, height: usize) -> Self {
        self.params.height = height;
        self
    }

    /// Replaces both grid dimensions.
    pub fn params(mut self, params: GridParams) -> Self {
        self.params = params;
        self
    }

    /// Plans placements on `threads` workers (0 = available parallelism).
    ///
    /// Small inputs are still composed sequentially.
    pub fn parallel(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Converts the builder into ComposeOptions.
    pub fn build_options(&self) -> ComposeOptions {
        ComposeOptions {
            params: self.params,
            threads: self.threads,
        }
    }

    /// Composes `words` and returns the grid.
    pub fn compose(&self, words: &[OcrWord]) -> Result<TextGrid> {
        compose_grid(words, self.frame, &self.build_options())
    }

    /// Composes `words` and returns the rendered text.
    pub fn render(&self, words: &[OcrWord]) -> Result<String> {
        Ok(self.compose(words)?.to_text())
    }

    /// Composes `words` and writes the rendered text to `writer`.
    pub fn write_to<W: Write>(&self, words: &[OcrWord], writer: &mut W) -> Result<()> {
        render_text_to_fp(words, self.frame, writer, Some(self.build_options()))
    }

    /// Composes `words` and atomically writes the rendered text to `path`.
    pub fn write_file(&self, words: &[OcrWord], path: impl AsRef<Path>) -> Result<()> {
        write_text_file(words, self.frame, path, Some(self.build_options()))
    }
}
