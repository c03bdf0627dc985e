//! Grid layout module.
//!
//! This module contains:
//! - Grid parameters (GridParams)
//! - The character grid (TextGrid)
//! - Word placement and composition (GridCompositor, compose)

pub mod compositor;
pub mod grid;
pub mod params;

pub use compositor::{
    CompositionStats, GridCompositor, WordPlacement, compose, compose_parallel, plan_word,
};
pub use grid::{BLANK, Cell, TextGrid};
pub use params::*;
