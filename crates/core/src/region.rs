//! Region re-OCR.
//!
//! Each reconstructed region is cropped out of the page and recognized again
//! as a whole, which gives the engine full multi-line context. A failing
//! region degrades to no text; its siblings are unaffected.

use image::GrayImage;
use image::imageops::crop_imm;
use serde::Serialize;
use tracing::{debug, warn};

use crate::layout::{Block, ReconstructParams};
use crate::ocr::OcrEngine;
use crate::utils::Rect;

/// A reconstructed region with the cleaned lines its re-OCR produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionText {
    pub bbox: Rect,
    pub lines: Vec<String>,
}

/// Crops `bbox`, grown by `pad` and clamped to the page, out of the page image.
pub fn crop_region(page: &GrayImage, bbox: &Rect, pad: i32) -> Option<GrayImage> {
    let (x, y, w, h) = bbox.to_pixel_crop(pad, page.width(), page.height())?;
    Some(crop_imm(page, x, y, w, h).to_image())
}

/// Splits engine output into trimmed, non-blank lines.
pub fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Re-OCRs one region. Engine failures yield an empty line list.
pub fn reocr_region<E: OcrEngine + ?Sized>(
    page: &GrayImage,
    region: &Block,
    engine: &E,
    params: &ReconstructParams,
) -> RegionText {
    let lines = match crop_region(page, &region.bbox, params.crop_padding) {
        Some(crop) => match engine.extract_text(&crop) {
            Ok(text) => clean_lines(&text),
            Err(e) => {
                warn!(bbox = %region.bbox, error = %e, "region re-OCR failed, skipping region");
                Vec::new()
            }
        },
        None => {
            debug!(bbox = %region.bbox, "region lies outside the page");
            Vec::new()
        }
    };

    RegionText {
        bbox: region.bbox,
        lines,
    }
}

/// Re-OCRs every region in production order.
pub fn reocr_regions<E: OcrEngine + ?Sized>(
    page: &GrayImage,
    regions: &[Block],
    engine: &E,
    params: &ReconstructParams,
) -> Vec<RegionText> {
    regions
        .iter()
        .map(|region| reocr_region(page, region, engine, params))
        .collect()
}

/// Pools all regions' lines into one flat list, region order preserved.
pub fn pool_lines(regions: &[RegionText]) -> Vec<String> {
    regions
        .iter()
        .flat_map(|r| r.lines.iter().cloned())
        .collect()
}
