//! High-level reconstruction API.
//!
//! Provides the main public API for page text reconstruction:
//! - `extract_text()` - Reconstruct all pages into one document string
//! - `extract_pages()` - Per-page text and regions, in page order
//! - `extract_page_text()` - Reconstruct a single page
//! - `analyze_page()` - Geometric stages only, without region re-OCR

use std::path::{Path, PathBuf};

use image::GrayImage;
use itertools::Itertools;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assembler::assemble;
use crate::error::{ReflowError, Result};
use crate::layout::{Block, ReconstructParams, Token, analyze_tokens};
use crate::ocr::OcrEngine;
use crate::region::{RegionText, pool_lines, reocr_regions};

/// Separator placed between page texts in a document.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// File extensions accepted as page images when loading a directory.
const PAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Options for document reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Layout reconstruction parameters.
    pub params: ReconstructParams,

    /// Worker threads for page-level parallelism. None uses all cores.
    pub threads: Option<usize>,
}

/// Reconstruction outcome for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    /// Zero-based position of the page in the input.
    pub page_index: usize,
    /// Assembled page text; `None` when no region produced any text.
    pub text: Option<String>,
    /// Regions in production order with their re-OCR'd lines.
    pub regions: Vec<RegionText>,
}

impl PageResult {
    fn empty(page_index: usize) -> Self {
        Self {
            page_index,
            text: None,
            regions: Vec::new(),
        }
    }
}

/// Decode a page image and convert it to grayscale.
pub fn load_page_image(path: &Path) -> Result<GrayImage> {
    Ok(image::open(path)?.to_luma8())
}

/// List the page images of a document.
///
/// A directory yields its image files sorted by file name; any other path is
/// a single-page document.
pub fn page_paths(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let p = entry?.path();
        let is_page = p.is_file()
            && p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| PAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if is_page {
            paths.push(p);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every page image of a document, in page order.
pub fn load_pages(path: &Path) -> Result<Vec<GrayImage>> {
    page_paths(path)?
        .iter()
        .map(|p| load_page_image(p))
        .collect()
}

/// Run token extraction and the geometric merge stages over one page.
///
/// Returns the final regions in the order the merge stages produced them.
pub fn analyze_page<E: OcrEngine + ?Sized>(
    page: &GrayImage,
    engine: &E,
    params: &ReconstructParams,
) -> Result<Vec<Block>> {
    let page_height = i32::try_from(page.height())
        .map_err(|_| ReflowError::InvalidParams(format!("page too tall: {}", page.height())))?;

    let tokens: Vec<Token> = engine
        .extract_tokens(page)?
        .iter()
        .map(|raw| Token::from_raw(raw, page_height))
        .collect();

    Ok(analyze_tokens(tokens, params))
}

/// Reconstruct one page: geometric stages, region re-OCR and assembly.
pub fn process_page<E: OcrEngine + ?Sized>(
    page_index: usize,
    page: &GrayImage,
    engine: &E,
    params: &ReconstructParams,
) -> Result<PageResult> {
    params.validate()?;
    let blocks = analyze_page(page, engine, params)?;
    let regions = reocr_regions(page, &blocks, engine, params);
    let text = assemble(&pool_lines(&regions));
    debug!(
        page = page_index + 1,
        regions = regions.len(),
        has_text = text.is_some(),
        "reconstructed page"
    );

    Ok(PageResult {
        page_index,
        text,
        regions,
    })
}

/// Reconstruct the text of a single page.
///
/// # Returns
/// `Ok(None)` when the page has no extractable text.
pub fn extract_page_text<E: OcrEngine + ?Sized>(
    page: &GrayImage,
    engine: &E,
    params: &ReconstructParams,
) -> Result<Option<String>> {
    Ok(process_page(0, page, engine, params)?.text)
}

/// Reconstruct every page on a bounded worker pool.
///
/// A page whose OCR fails is logged and reported without text; it never
/// aborts the batch. Results are returned in page order regardless of
/// completion order.
pub fn extract_pages<E: OcrEngine + ?Sized>(
    pages: &[GrayImage],
    engine: &E,
    options: &ExtractOptions,
) -> Result<Vec<PageResult>> {
    options.params.validate()?;

    let thread_count = options.threads.unwrap_or_else(default_thread_count);
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| ReflowError::ThreadPool(e.to_string()))?;

    let mut results: Vec<PageResult> = pool.install(|| {
        pages
            .par_iter()
            .enumerate()
            .map(|(page_index, page)| {
                match process_page(page_index, page, engine, &options.params) {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(page = page_index + 1, error = %e, "page OCR failed, skipping page");
                        PageResult::empty(page_index)
                    }
                }
            })
            .collect()
    });

    results.sort_by_key(|r| r.page_index);
    Ok(results)
}

/// Join page texts into one document, skipping pages without text.
pub fn join_pages(results: &[PageResult]) -> String {
    results
        .iter()
        .filter_map(|r| r.text.as_deref())
        .join(PAGE_SEPARATOR)
}

/// Reconstruct the full text of a document.
///
/// # Example
/// ```ignore
/// use reflow_core::high_level::{ExtractOptions, extract_text, load_pages};
/// use reflow_core::ocr::TesseractEngine;
///
/// let pages = load_pages("scans/report".as_ref())?;
/// let text = extract_text(&pages, &TesseractEngine::new(), &ExtractOptions::default())?;
/// println!("{}", text);
/// ```
pub fn extract_text<E: OcrEngine + ?Sized>(
    pages: &[GrayImage],
    engine: &E,
    options: &ExtractOptions,
) -> Result<String> {
    Ok(join_pages(&extract_pages(pages, engine, options)?))
}
