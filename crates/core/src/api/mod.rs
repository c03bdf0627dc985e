//! High-level API module for grid rendering.
//!
//! # Example
//!
//! ```ignore
//! use gridscribe_core::api::{render_text, ComposeOptions};
//!
//! let words = gridscribe_core::ocr::parse_paddle_json(&json)?;
//! let text = render_text(&words, SourceFrame::new(1000, 500)?, None)?;
//! ```

pub mod builder;
pub mod high_level;

// Re-export for convenience
pub use builder::GridBuilder;
pub use high_level::{
    ComposeOptions, PARALLEL_MIN_WORDS, compose_grid, render_text, render_text_to_fp,
    write_text_file,
};
