//! Grid compositor - projects OCR words onto a character grid.
//!
//! Each word is anchored at its box's left edge and *bottom* edge, scaled
//! into cell space, and laid out left to right one character per cell.
//! Words are applied in input order and later words overwrite earlier ones,
//! so the detector's reading order decides which word is visible when two
//! projections collide.
//!
//! Per-word anomalies never abort a run:
//! - empty text places nothing
//! - cells past the right or bottom edge, or at negative coordinates, are dropped
//! - boxes with non-finite coordinates are skipped entirely
//! - inverted boxes are placed from their anchor unchanged
//!
//! An invalid frame or grid size is rejected before anything is placed.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{GridError, Result};
use crate::geometry::{SourceFrame, scale};
use crate::layout::grid::{BLANK, Cell, TextGrid};
use crate::layout::params::GridParams;
use crate::ocr::OcrWord;

/// The writes one word produces, computed without touching a grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordPlacement {
    /// Scaled `(col, row)` of the first character, or None if the box was skipped.
    pub anchor: Option<(i64, i64)>,
    /// In-bounds cells, in character order.
    pub cells: Vec<Cell>,
    /// Characters that fell outside the grid.
    pub dropped: usize,
}

impl WordPlacement {
    fn skipped() -> Self {
        Self::default()
    }

    /// Whether the word's box was rejected before scaling.
    pub fn is_skipped(&self) -> bool {
        self.anchor.is_none()
    }
}

/// Counters gathered over one composition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompositionStats {
    pub words: usize,
    pub skipped_words: usize,
    pub written_chars: usize,
    pub dropped_chars: usize,
}

/// Computes where `word` lands in a grid of `params` size.
///
/// Control characters (tabs, line breaks) are written as blanks so a single
/// word can never split a row.
///
/// # Errors
/// Returns `GridError::InvalidFrame` if the frame has a zero dimension.
pub fn plan_word(
    word: &OcrWord,
    frame: &SourceFrame,
    params: &GridParams,
) -> Result<WordPlacement> {
    if !word.bbox.is_finite() {
        debug!(text = %word.text, bbox = ?word.bbox, "skipping word with non-finite box");
        return Ok(WordPlacement::skipped());
    }
    if !word.bbox.is_well_formed() {
        debug!(text = %word.text, bbox = ?word.bbox, "inverted box, placing from anchor as given");
    }

    let (x, y) = word.bbox.anchor();
    let (col, row) = scale(x, y, frame.width, frame.height, params.width, params.height)?;

    let width = params.width as i64;
    let height = params.height as i64;
    let row_in_bounds = (0..height).contains(&row);

    let mut placement = WordPlacement {
        anchor: Some((col, row)),
        cells: Vec::with_capacity(word.text.len()),
        dropped: 0,
    };
    for (i, ch) in word.text.chars().enumerate() {
        let c = col.saturating_add(i as i64);
        if row_in_bounds && (0..width).contains(&c) {
            let ch = if ch.is_control() { BLANK } else { ch };
            placement.cells.push(Cell { row, col: c, ch });
        } else {
            placement.dropped += 1;
        }
    }
    Ok(placement)
}

/// Owns the grid for one composition run.
#[derive(Debug)]
pub struct GridCompositor {
    frame: SourceFrame,
    params: GridParams,
    grid: TextGrid,
    stats: CompositionStats,
}

impl GridCompositor {
    /// Creates a compositor with a blank grid.
    ///
    /// # Errors
    /// Returns `GridError::InvalidFrame` or `GridError::InvalidGrid` if either
    /// size has a zero dimension.
    pub fn new(frame: SourceFrame, params: GridParams) -> Result<Self> {
        frame.validate()?;
        let grid = TextGrid::with_params(&params)?;
        Ok(Self {
            frame,
            params,
            grid,
            stats: CompositionStats::default(),
        })
    }

    /// The grid in its current state.
    pub fn grid(&self) -> &TextGrid {
        &self.grid
    }

    pub fn stats(&self) -> CompositionStats {
        self.stats
    }

    /// Places one word, overwriting any cells it shares with earlier words.
    ///
    /// Returns the number of characters written.
    pub fn place(&mut self, word: &OcrWord) -> Result<usize> {
        let placement = plan_word(word, &self.frame, &self.params)?;
        Ok(self.apply(&placement))
    }

    /// Places every word in order.
    pub fn place_all<'w, I>(&mut self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = &'w OcrWord>,
    {
        for word in words {
            self.place(word)?;
        }
        Ok(())
    }

    /// Replays a precomputed placement onto the grid.
    ///
    /// Returns the number of characters written.
    pub fn apply(&mut self, placement: &WordPlacement) -> usize {
        self.stats.words += 1;
        if placement.is_skipped() {
            self.stats.skipped_words += 1;
            return 0;
        }

        let mut written = 0;
        for &cell in &placement.cells {
            if self.grid.apply(cell) {
                written += 1;
            }
        }
        trace!(
            anchor = ?placement.anchor,
            written,
            dropped = placement.dropped,
            "placed word"
        );
        self.stats.written_chars += written;
        self.stats.dropped_chars += placement.dropped;
        written
    }

    /// Consumes the compositor and returns the finished grid.
    pub fn finish(self) -> TextGrid {
        debug!(
            words = self.stats.words,
            skipped = self.stats.skipped_words,
            written = self.stats.written_chars,
            dropped = self.stats.dropped_chars,
            "composition finished"
        );
        self.grid
    }
}

/// Builds a grid from `words`, placing them sequentially in input order.
///
/// # Errors
/// Fails only on a zero frame or grid dimension; no partial grid is returned.
pub fn compose(words: &[OcrWord], frame: SourceFrame, params: GridParams) -> Result<TextGrid> {
    let mut compositor = GridCompositor::new(frame, params)?;
    compositor.place_all(words)?;
    Ok(compositor.finish())
}

/// Builds a grid like [`compose`], planning words on a rayon pool.
///
/// Placements are computed in parallel and then replayed in input order, so
/// the result is identical to the sequential path.
///
/// # Arguments
/// * `threads` - Worker count. 0 uses the available parallelism, matching
///   `ComposeOptions::threads = Some(0)`.
pub fn compose_parallel(
    words: &[OcrWord],
    frame: SourceFrame,
    params: GridParams,
    threads: usize,
) -> Result<TextGrid> {
    let mut compositor = GridCompositor::new(frame, params)?;

    let thread_count = if threads == 0 {
        default_thread_count()
    } else {
        threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| GridError::ThreadPool(e.to_string()))?;

    let placements: Vec<WordPlacement> = pool.install(|| {
        words
            .par_iter()
            .map(|word| plan_word(word, &frame, &params))
            .collect::<Result<Vec<_>>>()
    })?;

    for placement in &placements {
        compositor.apply(placement);
    }
    Ok(compositor.finish())
}

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    fn frame() -> SourceFrame {
        SourceFrame::new(1000, 500).unwrap()
    }

    #[test]
    fn test_plan_word_anchor_uses_bottom_edge() {
        let word = OcrWord::new("Hi", BBox::new(100.0, 100.0, 140.0, 120.0));
        let placement = plan_word(&word, &frame(), &GridParams::default()).unwrap();
        assert_eq!(placement.anchor, Some((12, 14)));
        assert_eq!(
            placement.cells,
            vec![
                Cell { row: 14, col: 12, ch: 'H' },
                Cell { row: 14, col: 13, ch: 'i' },
            ]
        );
        assert_eq!(placement.dropped, 0);
    }

    #[test]
    fn test_plan_word_counts_dropped_chars() {
        // 995 * 120 / 1000 = 119.4 -> last column
        let word = OcrWord::new("abc", BBox::new(995.0, 0.0, 999.0, 10.0));
        let placement = plan_word(&word, &frame(), &GridParams::default()).unwrap();
        assert_eq!(placement.cells.len(), 1);
        assert_eq!(placement.cells[0].col, 119);
        assert_eq!(placement.dropped, 2);
    }

    #[test]
    fn test_plan_word_blanks_control_chars() {
        let word = OcrWord::new("a\nb", BBox::new(0.0, 0.0, 10.0, 10.0));
        let placement = plan_word(&word, &frame(), &GridParams::default()).unwrap();
        let chars: String = placement.cells.iter().map(|c| c.ch).collect();
        assert_eq!(chars, "a b");
    }

    #[test]
    fn test_plan_word_skips_non_finite_box() {
        let word = OcrWord::new("x", BBox::new(f64::NAN, 0.0, 1.0, f64::INFINITY));
        let placement = plan_word(&word, &frame(), &GridParams::default()).unwrap();
        assert!(placement.is_skipped());
        assert!(placement.cells.is_empty());
    }

    #[test]
    fn test_plan_word_places_inverted_box_from_anchor() {
        let word = OcrWord::new("ok", BBox::new(500.0, 300.0, 100.0, 100.0));
        assert!(!word.bbox.is_well_formed());
        let placement = plan_word(&word, &frame(), &GridParams::default()).unwrap();
        assert_eq!(placement.anchor, Some((60, 12)));
        assert_eq!(placement.cells.len(), 2);
    }

    #[test]
    fn test_compositor_stats() {
        let words = vec![
            OcrWord::new("ab", BBox::new(0.0, 0.0, 1.0, 10.0)),
            OcrWord::new("", BBox::new(0.0, 0.0, 1.0, 10.0)),
            OcrWord::new("z", BBox::new(f64::NAN, 0.0, 1.0, 1.0)),
            OcrWord::new("far", BBox::new(0.0, 0.0, 1.0, 500.0)),
        ];
        let mut compositor = GridCompositor::new(frame(), GridParams::default()).unwrap();
        compositor.place_all(&words).unwrap();
        assert_eq!(
            compositor.stats(),
            CompositionStats {
                words: 4,
                skipped_words: 1,
                written_chars: 2,
                dropped_chars: 3,
            }
        );
    }

    #[test]
    fn test_compositor_rejects_invalid_sizes() {
        let bad_frame = SourceFrame {
            width: 0,
            height: 10,
        };
        assert!(matches!(
            GridCompositor::new(bad_frame, GridParams::default()),
            Err(GridError::InvalidFrame { .. })
        ));
        let bad_params = GridParams {
            width: 10,
            height: 0,
        };
        assert!(matches!(
            GridCompositor::new(frame(), bad_params),
            Err(GridError::InvalidGrid { .. })
        ));
    }
}
