//! Error types for the pdf-ocr-tools library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PdfOcrError`] — **Fatal**: the run cannot proceed at all (missing
//!   input, unreadable PDF, no images, output cannot be written). Returned as
//!   `Err(PdfOcrError)` from [`crate::rasterize_pdf`] and
//!   [`crate::ocr_directory`].
//!
//! * [`PageError`] — **Non-fatal**: a single page could not be saved or a
//!   single image could not be recognised. Stored inside
//!   [`crate::output::PageOutcome`] / [`crate::output::ImageOutcome`] so the
//!   rest of the run carries on.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf-ocr-tools library.
#[derive(Debug, Error)]
pub enum PdfOcrError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input PDF was not found, or the path is not a regular file.
    #[error("File not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// The image folder does not exist or is not a directory.
    #[error("Directory {path:?} does not exist.")]
    DirectoryNotFound { path: PathBuf },

    /// The image folder exists but its entries could not be listed.
    #[error("Cannot read directory {path:?}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image folder holds no `.png`, `.jpg` or `.jpeg` files.
    #[error("No image files found in the directory {path:?}.")]
    NoImagesFound { path: PathBuf },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The page selection matched no page of the document.
    #[error("No selected page exists (document has {total} pages)")]
    PageOutOfRange { total: usize },

    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the page-image directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output text file.
    #[error("Error writing output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Engine errors ─────────────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium, place the library in the working\n\
directory, or install it system-wide.\n\
Pre-built libraries: https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),
}

/// A non-fatal error for a single page or image.
///
/// The run continues past it; the failed item simply contributes nothing to
/// the output.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum PageError {
    /// A rendered page could not be encoded or written to disk.
    #[error("Error saving page {page}: {detail}")]
    SaveFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },

    /// The OCR engine failed on one image.
    #[error("Error processing {file_name}: {detail}")]
    RecognitionFailed {
        index: usize,
        file_name: String,
        detail: String,
    },
}

/// Failure of a single OCR engine invocation.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// The engine process could not be started at all.
    #[error("failed to run '{binary}': {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but reported failure.
    #[error("{binary} exited with {status}: {stderr}")]
    Engine {
        binary: String,
        status: String,
        stderr: String,
    },

    /// The image file could not be read.
    #[error("cannot read image: {0}")]
    Unreadable(String),
}
