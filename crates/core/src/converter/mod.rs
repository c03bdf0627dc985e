//! Output converters for composed grids.
//!
//! - TextConverter: plain text, one right-trimmed line per row

mod text;

pub use text::TextConverter;
