//! OCR engine abstraction.
//!
//! The reconstruction consumes two operations from an engine:
//! - per-token extraction over a whole page, returning pixel boxes
//! - whole-image text extraction over a cropped region
//!
//! Both are treated as synchronous blocking calls with no internal retry.

pub mod tesseract;

use std::path::PathBuf;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use tesseract::{TesseractEngine, parse_tsv};

/// A token as reported by the engine, in raw image pixels (origin top-left).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawToken {
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Trait for OCR engines.
pub trait OcrEngine: Send + Sync {
    /// Check if this engine can run (binaries installed, models present).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this engine available.
    fn availability_hint(&self) -> String;

    /// Recognize individual tokens with their boxes on a full page.
    fn extract_tokens(&self, image: &GrayImage) -> Result<Vec<RawToken>>;

    /// Recognize the text of an image region as one multi-line string.
    fn extract_text(&self, image: &GrayImage) -> Result<String>;
}

/// Configuration for OCR engines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language for OCR (e.g., "vie", "eng", "chi_sim").
    pub language: String,
    /// Tesseract page segmentation mode.
    pub psm: u8,
    /// Tesseract OCR engine mode.
    pub oem: u8,
    /// Engine executable; looked up in PATH when not absolute.
    pub binary: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "vie".to_string(),
            psm: 3,
            oem: 3,
            binary: PathBuf::from("tesseract"),
        }
    }
}
