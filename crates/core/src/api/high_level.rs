//! High-level rendering API.
//!
//! Provides the main public API for turning OCR words into a text layout:
//! - `compose_grid()` - Build the grid with the configured execution strategy
//! - `render_text()` - Render the layout as a String
//! - `render_text_to_fp()` - Render the layout to a writer
//! - `write_text_file()` - Render the layout to a file, atomically

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::converter::TextConverter;
use crate::error::Result;
use crate::geometry::SourceFrame;
use crate::layout::compositor::default_thread_count;
use crate::layout::{GridParams, TextGrid, compose, compose_parallel};
use crate::ocr::OcrWord;

/// Inputs shorter than this are always composed on the calling thread.
pub const PARALLEL_MIN_WORDS: usize = 512;

/// Options for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposeOptions {
    /// Output grid dimensions.
    pub params: GridParams,

    /// Worker threads for planning placements.
    ///
    /// None (the default) or `Some(1)` composes sequentially on the calling
    /// thread. `Some(0)` uses the available parallelism and `Some(n)` uses `n`
    /// workers. Output is identical either way.
    pub threads: Option<usize>,
}

impl ComposeOptions {
    fn worker_count(&self) -> usize {
        match self.threads {
            None => 1,
            Some(0) => default_thread_count(),
            Some(n) => n,
        }
    }
}

/// Builds the grid for `words` using the strategy selected by `options`.
pub fn compose_grid(
    words: &[OcrWord],
    frame: SourceFrame,
    options: &ComposeOptions,
) -> Result<TextGrid> {
    let workers = options.worker_count();
    if workers > 1 && words.len() >= PARALLEL_MIN_WORDS {
        debug!(words = words.len(), workers, "composing in parallel");
        compose_parallel(words, frame, options.params, workers)
    } else {
        compose(words, frame, options.params)
    }
}

/// Render the layout of `words` as a String.
///
/// # Arguments
/// * `words` - Recognized words, in reading order
/// * `frame` - Pixel dimensions the word boxes were measured in
/// * `options` - Rendering options (None for defaults)
///
/// # Example
/// ```ignore
/// use gridscribe_core::high_level::render_text;
///
/// let text = render_text(&words, SourceFrame::new(1000, 500)?, None)?;
/// print!("{}", text);
/// ```
pub fn render_text(
    words: &[OcrWord],
    frame: SourceFrame,
    options: Option<ComposeOptions>,
) -> Result<String> {
    let options = options.unwrap_or_default();
    let grid = compose_grid(words, frame, &options)?;
    Ok(grid.to_text())
}

/// Render the layout of `words` to a writer.
///
/// The grid is fully composed before the first byte is written, so an
/// invalid frame or grid size leaves the writer untouched.
pub fn render_text_to_fp<W: Write>(
    words: &[OcrWord],
    frame: SourceFrame,
    writer: &mut W,
    options: Option<ComposeOptions>,
) -> Result<()> {
    let options = options.unwrap_or_default();
    let grid = compose_grid(words, frame, &options)?;
    let mut converter = TextConverter::new(writer);
    converter.receive_grid(&grid)?;
    converter.close()
}

/// Render the layout of `words` to the file at `path`.
///
/// Output is written to a temporary file in the destination directory and
/// renamed over `path` once complete. On any failure no file is created and an
/// existing file at `path` is left as it was.
pub fn write_text_file(
    words: &[OcrWord],
    frame: SourceFrame,
    path: impl AsRef<Path>,
    options: Option<ComposeOptions>,
) -> Result<()> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    render_text_to_fp(words, frame, &mut buffer, options)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".gridscribe-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(&buffer)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = buffer.len(), "wrote text layout");
    Ok(())
}
