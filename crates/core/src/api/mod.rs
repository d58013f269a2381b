//! High-level API module for page text reconstruction.
//!
//! # Example
//!
//! ```ignore
//! use reflow_core::api::{extract_text, ExtractOptions};
//! use reflow_core::ocr::TesseractEngine;
//!
//! let pages = reflow_core::api::load_pages("scans/report".as_ref())?;
//! let text = extract_text(&pages, &TesseractEngine::new(), &ExtractOptions::default())?;
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    ExtractOptions, PAGE_SEPARATOR, PageResult, analyze_page, extract_page_text, extract_pages,
    extract_text, join_pages, load_page_image, load_pages, page_paths, process_page,
};
