//! CLI binary: convert a PDF into one image file per page.
//!
//! A thin shim over the library crate that maps CLI flags to `RasterConfig`
//! and logs the result. Failures are logged; the process still exits 0.

use anyhow::{Context, Result};
use clap::Parser;
use pdf_ocr_tools::cli::init_tracing;
use pdf_ocr_tools::{pdf_to_images, OutputFormat, PageSelection, RasterConfig};
use std::path::PathBuf;
use tracing::error;

const AFTER_HELP: &str = r#"EXAMPLES:
  # All pages as 300 DPI PNGs into ./report_images/
  pdf-to-images report.pdf

  # JPEG at 150 DPI
  pdf-to-images --dpi 150 --fmt jpeg report.pdf

  # Pages 3 to 7 of an encrypted file
  pdf-to-images --pages 3-7 --password hunter2 locked.pdf

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium (.so / .dylib / .dll)
  RUST_LOG          Log filter, overrides --verbose / --quiet
"#;

/// Convert a PDF into images.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-to-images",
    version,
    about = "Convert a PDF into images.",
    long_about = "Render every page of a PDF into its own image file, written as \
page_001.<fmt>, page_002.<fmt>, … into a <pdf-stem>_images directory next to the PDF.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF file to convert.
    pdf_path: PathBuf,

    /// Image resolution.
    #[arg(long, env = "PDF_TO_IMAGES_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(1..=1200))]
    dpi: u32,

    /// Image output format.
    #[arg(long, env = "PDF_TO_IMAGES_FMT", value_enum, default_value = "png")]
    fmt: FormatArg,

    /// Page selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "PDF_TO_IMAGES_PAGES", default_value = "all")]
    pages: String,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF_TO_IMAGES_PASSWORD")]
    password: Option<String>,

    /// Write pages here instead of <pdf-stem>_images next to the PDF.
    #[arg(long, env = "PDF_TO_IMAGES_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

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

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Png,
    Jpeg,
    Jpg,
    Tiff,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Jpg => OutputFormat::Jpg,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
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

    match pdf_to_images(&cli.pdf_path, &config) {
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

/// Map CLI args to `RasterConfig`.
fn build_config(cli: &Cli) -> Result<RasterConfig> {
    let pages: PageSelection = cli.pages.parse().context("Invalid --pages")?;

    let mut builder = RasterConfig::builder()
        .dpi(cli.dpi)
        .format(cli.fmt.into())
        .pages(pages);

    if let Some(ref password) = cli.password {
        builder = builder.password(password);
    }
    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }

    builder.build().context("Invalid configuration")
}
