//! gridscribe - project OCR word boxes onto a fixed-size monospace text grid.

pub mod api;
pub mod converter;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod ocr;

pub use api::high_level;

pub use error::{GridError, Result};
pub use geometry::{BBox, SourceFrame, scale};
pub use layout::{GridParams, TextGrid, compose};
pub use ocr::OcrWord;
