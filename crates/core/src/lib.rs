//! reflow - Reading-order text reconstruction from OCR token geometry.
//!
//! Takes the scattered word boxes an OCR engine reports for a scanned page,
//! rebuilds lines, blocks and paragraphs from their geometry, re-OCRs each
//! reconstructed region and assembles one clean string per page.

pub mod api;
pub mod assembler;
pub mod error;
pub mod layout;
pub mod ocr;
pub mod region;
pub mod utils;

// Re-export high_level for convenience
pub use api::high_level;

pub use error::{ReflowError, Result};
