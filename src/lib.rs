//! # pdf-ocr-tools
//!
//! Two small document pipelines, each usable as a library call or a CLI:
//!
//! * **PDF → images** ([`pdf_to_images`]): render every page of a PDF with
//!   pdfium and write `page_001.png`, `page_002.png`, … into a
//!   `<stem>_images` directory next to the PDF.
//! * **Images → text** ([`images_to_text`]): OCR every `.png` / `.jpg` /
//!   `.jpeg` in a folder with Tesseract, in file-name order, and write one
//!   `<folder>.txt` next to the folder with a `===== Page N : file =====`
//!   marker before each image's text.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document.pdf ──render──▶ document_images/page_NNN.png ──OCR──▶ document_images.txt
//! ```
//!
//! Both pipelines are sequential and synchronous. Fatal problems (missing
//! input, unreadable PDF, no images, unwritable output) come back as
//! [`PdfOcrError`]; a page that cannot be saved or an image that cannot be
//! recognised is recorded as a [`PageError`] inside the run report and the
//! run carries on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_ocr_tools::{images_to_text, pdf_to_images, OcrConfig, RasterConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let raster = pdf_to_images("scan.pdf", &RasterConfig::default())?;
//!     let ocr = images_to_text(&raster.output_dir, &OcrConfig::default())?;
//!     println!("{} pages → {}", raster.saved_pages(), ocr.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Engines
//!
//! pdfium is bound at runtime (`PDFIUM_LIB_PATH`, then `./`, then the system
//! library). Tesseract is run as an external command. Both sit behind traits
//! ([`PageRasterizer`], [`TextRecognizer`]) so [`rasterize_pdf`] and
//! [`ocr_directory`] accept any engine.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-to-images` and `images-to-text` binaries |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod aggregate;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod rasterize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use aggregate::{images_to_text, ocr_directory};
pub use config::{
    OcrConfig, OcrConfigBuilder, OutputFormat, PageSelection, RasterConfig, RasterConfigBuilder,
};
pub use error::{PageError, PdfOcrError, RecognizeError};
pub use output::{ImageOutcome, OcrReport, PageOutcome, RasterReport, RecognitionResult};
pub use pipeline::recognize::{TesseractRecognizer, TextRecognizer};
pub use pipeline::render::{PageRasterizer, PdfiumRasterizer, RenderedDocument, RenderedPage};
pub use rasterize::{pdf_to_images, rasterize_pdf};
