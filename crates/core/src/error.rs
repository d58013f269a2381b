//! Error types for the reflow reconstruction library.

use thiserror::Error;

/// Primary error type for page reconstruction.
#[derive(Error, Debug)]
pub enum ReflowError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("malformed tesseract tsv: {0}")]
    Tsv(#[from] csv::Error),

    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("worker pool error: {0}")]
    ThreadPool(String),
}

/// Convenience Result type alias for ReflowError.
pub type Result<T> = std::result::Result<T, ReflowError>;
