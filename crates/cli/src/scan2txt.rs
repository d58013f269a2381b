//! scan2txt - Extract reading-order text from scanned page images
//!
//! A command line tool that OCRs scanned pages, rebuilds lines, blocks and
//! paragraphs from the token geometry and writes one clean text per document.
//!
//! Each input is a document: a directory of page images (pages sorted by file
//! name) or a single image file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use reflow_core::high_level::{ExtractOptions, extract_pages, join_pages, load_pages};
use reflow_core::ocr::{OcrConfig, OcrEngine, TesseractEngine};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output type for the extracted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum OutputType {
    /// Plain text, pages separated by a blank line (default)
    #[default]
    Text,
    /// JSON with per-page text and region boxes
    Json,
}

/// A command line tool for extracting reading-order text from scanned pages.
#[derive(Parser, Debug)]
#[command(name = "scan2txt")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// One or more documents: page image directories or single images
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// TOML file with [ocr] and [extract] sections; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    // === OCR options ===
    /// OCR language (e.g. "vie", "eng")
    #[arg(short = 'l', long)]
    language: Option<String>,

    /// Tesseract page segmentation mode
    #[arg(long)]
    psm: Option<u8>,

    /// Tesseract OCR engine mode
    #[arg(long)]
    oem: Option<u8>,

    /// Path to the tesseract executable
    #[arg(long)]
    tesseract: Option<PathBuf>,

    // === Layout reconstruction options ===
    /// Maximum passes for the iterative merge stages
    #[arg(long = "max-passes")]
    max_passes: Option<usize>,

    /// Tokens longer than this many characters are dropped as noise
    #[arg(long = "max-token-chars")]
    max_token_chars: Option<usize>,

    /// Cap on the vertical gap between lines of one block, in pixels
    #[arg(long = "line-gap-cap")]
    line_gap_cap: Option<i32>,

    /// Padding around blocks when testing paragraph overlap, in pixels
    #[arg(long = "paragraph-padding")]
    paragraph_padding: Option<i32>,

    /// Padding around regions when cropping for re-OCR, in pixels
    #[arg(long = "crop-padding")]
    crop_padding: Option<i32>,

    /// Worker threads for page-level parallelism (default: all cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    /// Write one <stem>.txt (or .json) per document into this directory
    #[arg(short = 'O', long = "output-dir")]
    output_dir: Option<PathBuf>,
}

/// Settings loadable from `--config`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    ocr: OcrConfig,
    extract: ExtractOptions,
}

impl ConfigFile {
    fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Apply command line overrides on top of the file (or default) settings.
fn build_settings(args: &Args, file: ConfigFile) -> Result<(OcrConfig, ExtractOptions)> {
    let ConfigFile {
        ocr: mut config,
        extract: mut options,
    } = file;

    if let Some(ref language) = args.language {
        config.language = language.clone();
    }
    if let Some(psm) = args.psm {
        config.psm = psm;
    }
    if let Some(oem) = args.oem {
        config.oem = oem;
    }
    if let Some(ref binary) = args.tesseract {
        config.binary = binary.clone();
    }

    let params = &mut options.params;
    if let Some(v) = args.max_passes {
        params.max_passes = v;
    }
    if let Some(v) = args.max_token_chars {
        params.max_token_chars = v;
    }
    if let Some(v) = args.line_gap_cap {
        params.line_gap_cap = v;
    }
    if let Some(v) = args.paragraph_padding {
        params.paragraph_padding = v;
    }
    if let Some(v) = args.crop_padding {
        params.crop_padding = v;
    }
    params.validate()?;

    if args.threads.is_some() {
        options.threads = args.threads;
    }
    if options.threads == Some(0) {
        bail!("--threads must be at least 1");
    }

    Ok((config, options))
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reconstruct one document and render it in the requested format.
fn process_document<E: OcrEngine + ?Sized>(
    path: &Path,
    engine: &E,
    options: &ExtractOptions,
    output_type: OutputType,
) -> Result<String> {
    let pages =
        load_pages(path).with_context(|| format!("failed to load pages from {}", path.display()))?;
    info!(document = %path.display(), pages = pages.len(), "processing document");

    let results = extract_pages(&pages, engine, options)
        .with_context(|| format!("failed to process {}", path.display()))?;

    match output_type {
        OutputType::Text => Ok(join_pages(&results)),
        OutputType::Json => {
            let doc = serde_json::json!({
                "document": path.display().to_string(),
                "pages": results,
            });
            Ok(serde_json::to_string_pretty(&doc)?)
        }
    }
}

/// Output file for a document in `--output-dir` mode.
fn document_output_path(output_dir: &Path, input: &Path, output_type: OutputType) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let ext = match output_type {
        OutputType::Text => "txt",
        OutputType::Json => "json",
    };
    output_dir.join(format!("{}.{}", stem, ext))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let file = match args.config {
        Some(ref path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let (config, options) = build_settings(&args, file)?;
    debug!(?config, ?options, "resolved settings");

    let engine = TesseractEngine::with_config(config);
    if !engine.is_available() {
        bail!("{}", engine.availability_hint());
    }

    for path in &args.files {
        if !path.exists() {
            bail!("File not found: {}", path.display());
        }
    }

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("failed to create {}", output_dir.display()))?;
        for path in &args.files {
            let rendered = process_document(path, &engine, &options, args.output_type)?;
            let out = document_output_path(output_dir, path, args.output_type);
            fs::write(&out, rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(output = %out.display(), "wrote document");
        }
        return Ok(());
    }

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("Failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        let rendered = process_document(path, &engine, &options, args.output_type)?;
        writeln!(output, "{}", rendered)?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("scan2txt").chain(argv.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["scans"]);
        let (config, options) = build_settings(&args, ConfigFile::default()).unwrap();
        assert_eq!(config, OcrConfig::default());
        assert_eq!(options, ExtractOptions::default());
        assert_eq!(args.output_type, OutputType::Text);
        assert_eq!(args.outfile, "-");
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reflow.toml");
        fs::write(
            &path,
            "[ocr]\nlanguage = \"eng\"\npsm = 6\n\n[extract]\nthreads = 2\n\n[extract.params]\nmax_passes = 7\ncrop_padding = 8\n",
        )
        .unwrap();

        let args = parse(&["scans", "--psm", "4", "--crop-padding", "3", "-j", "1"]);
        let (config, options) = build_settings(&args, ConfigFile::load(&path).unwrap()).unwrap();

        assert_eq!(config.language, "eng");
        assert_eq!(config.psm, 4);
        assert_eq!(config.oem, 3);
        assert_eq!(options.params.max_passes, 7);
        assert_eq!(options.params.crop_padding, 3);
        assert_eq!(options.params.paragraph_padding, 2);
        assert_eq!(options.threads, Some(1));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let args = parse(&["scans", "--max-passes", "0"]);
        assert!(build_settings(&args, ConfigFile::default()).is_err());

        let args = parse(&["scans", "-j", "0"]);
        assert!(build_settings(&args, ConfigFile::default()).is_err());
    }

    #[test]
    fn test_document_output_path() {
        let out = Path::new("out");
        assert_eq!(
            document_output_path(out, Path::new("scans/report"), OutputType::Text),
            Path::new("out/report.txt")
        );
        assert_eq!(
            document_output_path(out, Path::new("page1.png"), OutputType::Json),
            Path::new("out/page1.json")
        );
    }
}
