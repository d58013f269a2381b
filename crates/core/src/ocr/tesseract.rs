//! Tesseract OCR engine implementation.
//!
//! Runs the Tesseract command-line binary on a temporary PNG. Token
//! extraction uses the `tsv` output config; region text uses plain stdout.

use std::path::Path;
use std::process::Command;

use image::{GrayImage, ImageFormat};
use serde::Deserialize;
use tracing::trace;

use super::{OcrConfig, OcrEngine, RawToken};
use crate::error::{ReflowError, Result};

/// TSV hierarchy level of a single word.
const WORD_LEVEL: u8 = 5;

/// One row of Tesseract's TSV output.
#[derive(Debug, Deserialize)]
struct TsvRecord {
    level: u8,
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    #[serde(default)]
    text: String,
}

/// Parses Tesseract TSV output into word tokens, in reported order.
///
/// Page, block, paragraph and line rows carry no text and are skipped.
pub fn parse_tsv(tsv: &str) -> Result<Vec<RawToken>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(tsv.as_bytes());

    let mut tokens = Vec::new();
    for record in reader.deserialize() {
        let record: TsvRecord = record?;
        if record.level != WORD_LEVEL {
            continue;
        }
        tokens.push(RawToken {
            text: record.text,
            left: record.left,
            top: record.top,
            width: record.width,
            height: record.height,
        });
    }
    Ok(tokens)
}

/// Tesseract OCR engine.
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    /// Create a new Tesseract engine with default configuration.
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create a new Tesseract engine with custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Run Tesseract on an image file, optionally with a named output config.
    fn run_tesseract(&self, image_path: &Path, output_config: Option<&str>) -> Result<String> {
        let mut command = Command::new(&self.config.binary);
        command
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.config.language])
            .args(["--psm", &self.config.psm.to_string()])
            .args(["--oem", &self.config.oem.to_string()]);
        if let Some(name) = output_config {
            command.arg(name);
        }

        match command.output() {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(ReflowError::OcrFailed(format!(
                        "tesseract failed: {}",
                        stderr.trim()
                    )))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ReflowError::EngineNotAvailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.config.binary.display()
                )))
            }
            Err(e) => Err(ReflowError::Io(e)),
        }
    }

    /// Write the image to a temporary PNG and run Tesseract on it.
    fn run_on_image(&self, image: &GrayImage, output_config: Option<&str>) -> Result<String> {
        let file = tempfile::Builder::new()
            .prefix("reflow-")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(file.path(), ImageFormat::Png)?;
        trace!(
            width = image.width(),
            height = image.height(),
            path = %file.path().display(),
            "running tesseract"
        );
        self.run_tesseract(file.path(), output_config)
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn is_available(&self) -> bool {
        Command::new(&self.config.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn availability_hint(&self) -> String {
        if self.is_available() {
            "Tesseract is available".to_string()
        } else {
            format!(
                "{} not runnable. Install with: apt install tesseract-ocr tesseract-ocr-{}",
                self.config.binary.display(),
                self.config.language
            )
        }
    }

    fn extract_tokens(&self, image: &GrayImage) -> Result<Vec<RawToken>> {
        let tsv = self.run_on_image(image, Some("tsv"))?;
        parse_tsv(&tsv)
    }

    fn extract_text(&self, image: &GrayImage) -> Result<String> {
        self.run_on_image(image, None)
    }
}
