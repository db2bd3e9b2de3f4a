//! CLI binary: OCR a folder of images into one text file with page breaks.
//!
//! A thin shim over the library crate that maps CLI flags to `OcrConfig`
//! and logs the result. Failures are logged; the process still exits 0.

use anyhow::{Context, Result};
use clap::Parser;
use pdf_ocr_tools::cli::init_tracing;
use pdf_ocr_tools::{images_to_text, OcrConfig};
use std::path::PathBuf;
use tracing::error;

const AFTER_HELP: &str = r#"EXAMPLES:
  # English OCR of ./report_images/*.png|jpg|jpeg → ./report_images.txt
  pdf-to-images report.pdf && images-to-text report_images

  # French, single-column layout
  images-to-text --lang fra --psm 4 scans/

PAGE ORDER:
  Images are read in lexicographic file-name order. Zero-pad page numbers
  (page_001.png, page_002.png, …) so that order matches reading order.

ENVIRONMENT VARIABLES:
  TESSERACT_PATH    Tesseract executable (default: tesseract on PATH)
  RUST_LOG          Log filter, overrides --verbose / --quiet
"#;

/// Performs OCR on a folder of image files and outputs a single .txt file with page breaks.
#[derive(Parser, Debug)]
#[command(
    name = "images-to-text",
    version,
    about = "Performs OCR on a folder of image files and outputs a single .txt file with page breaks.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the folder containing images.
    input_dir: PathBuf,

    /// Tesseract OCR language (e.g., eng, fra, deu...).
    #[arg(long, env = "IMAGES_TO_TEXT_LANG", default_value = "eng")]
    lang: String,

    /// Tesseract executable.
    #[arg(long, env = "TESSERACT_PATH", default_value = "tesseract")]
    tesseract: PathBuf,

    /// Directory containing the .traineddata files.
    #[arg(long, env = "IMAGES_TO_TEXT_TESSDATA_DIR")]
    tessdata_dir: Option<PathBuf>,

    /// Tesseract page segmentation mode (0–13).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=13))]
    psm: Option<u8>,

    /// Write the text here instead of <folder>.txt next to the folder.
    #[arg(short, long, env = "IMAGES_TO_TEXT_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the run report as JSON when done.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level logs.
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet || cli.json);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return Ok(());
        }
    };

    match images_to_text(&cli.input_dir, &config) {
        Ok(report) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialise report")?
                );
            }
        }
        Err(e) => error!("{}", e),
    }

    Ok(())
}

/// Map CLI args to `OcrConfig`.
fn build_config(cli: &Cli) -> Result<OcrConfig> {
    let mut builder = OcrConfig::builder()
        .lang(cli.lang.clone())
        .tesseract(cli.tesseract.clone());

    if let Some(ref dir) = cli.tessdata_dir {
        builder = builder.tessdata_dir(dir);
    }
    if let Some(psm) = cli.psm {
        builder = builder.psm(psm);
    }
    if let Some(ref out) = cli.output {
        builder = builder.output_path(out);
    }

    builder.build().context("Invalid configuration")
}
