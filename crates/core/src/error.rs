//! Error types for gridscribe layout composition.

use thiserror::Error;

/// Primary error type for grid composition and its boundary adapters.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("invalid source frame {width}x{height}: both dimensions must be positive")]
    InvalidFrame { width: u32, height: u32 },

    #[error("invalid target grid {width}x{height}: dimensions must be positive and within the cell limit")]
    InvalidGrid { width: usize, height: usize },

    #[error("malformed OCR record: {0}")]
    MalformedRecord(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Convenience Result type alias for GridError.
pub type Result<T> = std::result::Result<T, GridError>;
