//! OCR input types and boundary adapters.
//!
//! The compositor only consumes a flat, ordered sequence of [`OcrWord`]s.
//! Detector output arrives in a nested shape (pages of detections, each a quad
//! plus a `[text, score]` pair); the parsers here flatten it at the boundary so
//! nothing downstream depends on that layout.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{GridError, Result};
use crate::geometry::{BBox, Quad};

/// A recognized word and where it was found in source pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    pub text: String,
    #[serde(alias = "box")]
    pub bbox: BBox,
}

impl OcrWord {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// Builds a word from one detection quad. See [`BBox::from_quad`].
    pub fn from_quad(text: impl Into<String>, quad: &Quad) -> Self {
        Self::new(text, BBox::from_quad(quad))
    }
}

/// One detection as emitted by PaddleOCR: `[quad, [text, score]]`.
type PaddleDetection = (Quad, (String, f64));

/// Parses a raw PaddleOCR `ocr()` result into a flat word list.
///
/// The input is a list of pages; each page is either `null` (nothing detected)
/// or a list of detections. Words keep detector order: pages first, then
/// detections within a page.
///
/// # Errors
/// - `GridError::Json` if the document is not a list of pages.
/// - `GridError::MalformedRecord` if a detection does not have the
///   `[quad, [text, score]]` shape.
pub fn parse_paddle_json(input: &str) -> Result<Vec<OcrWord>> {
    let pages: Vec<Option<Vec<Value>>> = serde_json::from_str(input)?;
    flatten_paddle_pages(pages)
}

/// Flattens already-decoded PaddleOCR pages. See [`parse_paddle_json`].
pub fn flatten_paddle_pages(pages: Vec<Option<Vec<Value>>>) -> Result<Vec<OcrWord>> {
    let mut words = Vec::new();
    for (page_idx, page) in pages.into_iter().enumerate() {
        let Some(detections) = page else {
            debug!(page = page_idx, "page has no detections");
            continue;
        };
        words.reserve(detections.len());
        for (det_idx, detection) in detections.into_iter().enumerate() {
            let (quad, (text, _score)): PaddleDetection = serde_json::from_value(detection)
                .map_err(|e| {
                    GridError::MalformedRecord(format!(
                        "page {}, detection {}: {}",
                        page_idx, det_idx, e
                    ))
                })?;
            words.push(OcrWord::from_quad(text, &quad));
        }
    }
    debug!(words = words.len(), "flattened OCR result");
    Ok(words)
}

/// Parses an already-flat word list:
/// `[{"text": "...", "bbox": [x_min, y_min, x_max, y_max]}, ...]`.
///
/// The box field may also be spelled `box`.
pub fn parse_words_json(input: &str) -> Result<Vec<OcrWord>> {
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_json_accepts_box_alias() {
        let words =
            parse_words_json(r#"[{"text": "a", "box": [1, 2, 3, 4]}, {"text": "b", "bbox": [5, 6, 7, 8]}]"#)
                .unwrap();
        assert_eq!(words[0], OcrWord::new("a", BBox::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(words[1].bbox, BBox::new(5.0, 6.0, 7.0, 8.0));
    }

    #[test]
    fn test_paddle_detection_wrong_arity() {
        let err = parse_paddle_json(r#"[[[[[0, 0], [1, 0], [1, 1]], ["x", 0.9]]]]"#).unwrap_err();
        match err {
            GridError::MalformedRecord(msg) => assert!(msg.starts_with("page 0, detection 0")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_paddle_not_a_list() {
        assert!(matches!(
            parse_paddle_json(r#"{"text": "x"}"#),
            Err(GridError::Json(_))
        ));
    }
}
