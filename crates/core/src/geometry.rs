//! Geometry primitives and the pixel-to-cell scaler.
//!
//! Provides:
//! - Point and quadrilateral types as emitted by OCR detectors
//! - `BBox`, the axis-aligned word box in source pixel space
//! - `SourceFrame`, the pixel dimensions boxes are measured against
//! - `scale`, the linear truncating projection into grid cells

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// A 2D point (x, y) in source pixel space, origin at the top-left.
pub type Point = (f64, f64);

/// Four corner points of a detected text region, clockwise from top-left.
pub type Quad = [Point; 4];

/// An axis-aligned rectangle in source pixel space.
///
/// `x_min <= x_max` and `y_min <= y_max` are expected but not enforced;
/// OCR output is not guaranteed to be clean.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Builds a box from a detection quad.
    ///
    /// The top-left corner supplies `x_min`/`y_min` and the bottom-right corner
    /// supplies `x_max`/`y_max`. Coordinates are truncated to whole pixels.
    pub fn from_quad(quad: &Quad) -> Self {
        let (x_min, y_min) = quad[0];
        let (x_max, y_max) = quad[2];
        Self::new(x_min.trunc(), y_min.trunc(), x_max.trunc(), y_max.trunc())
    }

    /// Point used to position the first character of a word.
    ///
    /// This is the left edge paired with the *bottom* edge, not the top-left
    /// corner. Existing layouts depend on it; do not change it to `y_min`.
    #[inline]
    pub fn anchor(&self) -> Point {
        (self.x_min, self.y_max)
    }

    /// Whether every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.y_min.is_finite()
            && self.x_max.is_finite()
            && self.y_max.is_finite()
    }

    /// Whether the box is non-inverted on both axes.
    pub fn is_well_formed(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }
}

impl From<[f64; 4]> for BBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x_min, b.y_min, b.x_max, b.y_max]
    }
}

/// Pixel dimensions of the image the OCR boxes were measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFrame {
    pub width: u32,
    pub height: u32,
}

impl SourceFrame {
    /// Creates a frame, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let frame = Self { width, height };
        frame.validate()?;
        Ok(frame)
    }

    /// Checks that both dimensions are positive.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::InvalidFrame {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Scales a point from source pixel space into grid cell space.
///
/// Computes `x * target_width / source_width` and `y * target_height / source_height`,
/// truncated toward zero. No clamping is applied: a point on the far edge of the
/// source lands exactly on `target_width`/`target_height`, which the caller must
/// treat as out of bounds. Non-finite inputs saturate (NaN maps to 0), so callers
/// should filter them first.
///
/// # Errors
/// Returns `GridError::InvalidFrame` if either source dimension is zero.
pub fn scale(
    x: f64,
    y: f64,
    source_width: u32,
    source_height: u32,
    target_width: usize,
    target_height: usize,
) -> Result<(i64, i64)> {
    if source_width == 0 || source_height == 0 {
        return Err(GridError::InvalidFrame {
            width: source_width,
            height: source_height,
        });
    }

    let scaled_x = (x * target_width as f64 / f64::from(source_width)).trunc() as i64;
    let scaled_y = (y * target_height as f64 / f64::from(source_height)).trunc() as i64;
    Ok((scaled_x, scaled_y))
}
