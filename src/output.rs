//! Run results: per-item outcomes and per-run reports.
//!
//! Every page the rasterizer writes and every image the aggregator reads gets
//! a tagged outcome, so partial failure is visible in the return value rather
//! than only in the log.

use crate::config::OutputFormat;
use crate::error::PageError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of writing one rendered page to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOutcome {
    Saved { page_num: usize, path: PathBuf },
    Failed(PageError),
}

impl PageOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PageOutcome::Saved { .. })
    }
}

/// Summary of one rasterizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterReport {
    /// Canonical path of the source PDF.
    pub pdf_path: PathBuf,
    /// Directory the page images were written to.
    pub output_dir: PathBuf,
    pub dpi: u32,
    pub format: OutputFormat,
    /// Total pages in the document, selected or not.
    pub total_pages: usize,
    /// One entry per rendered page, in page order.
    pub pages: Vec<PageOutcome>,
    pub render_duration_ms: u64,
    pub total_duration_ms: u64,
}

impl RasterReport {
    pub fn saved_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_saved()).count()
    }

    pub fn failed_pages(&self) -> usize {
        self.pages.len() - self.saved_pages()
    }

    /// Paths of the page files that were written.
    pub fn saved_paths(&self) -> Vec<&PathBuf> {
        self.pages
            .iter()
            .filter_map(|p| match p {
                PageOutcome::Saved { path, .. } => Some(path),
                PageOutcome::Failed(_) => None,
            })
            .collect()
    }
}

/// Text recognised from one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// 1-based position of the image in the sorted folder listing.
    pub index: usize,
    pub file_name: String,
    /// Engine output with surrounding whitespace trimmed.
    pub text: String,
}

/// Result of recognising one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOutcome {
    Recognized(RecognitionResult),
    Failed(PageError),
}

/// Summary of one OCR aggregator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrReport {
    /// Canonical path of the image folder.
    pub input_dir: PathBuf,
    /// The text file written.
    pub output_path: PathBuf,
    pub lang: String,
    /// One entry per matching image, in sorted filename order.
    pub images: Vec<ImageOutcome>,
    /// Byte length of the written text file.
    pub output_bytes: usize,
    pub total_duration_ms: u64,
}

impl OcrReport {
    pub fn recognized(&self) -> impl Iterator<Item = &RecognitionResult> {
        self.images.iter().filter_map(|o| match o {
            ImageOutcome::Recognized(r) => Some(r),
            ImageOutcome::Failed(_) => None,
        })
    }

    pub fn recognized_count(&self) -> usize {
        self.recognized().count()
    }

    pub fn failed_count(&self) -> usize {
        self.images.len() - self.recognized_count()
    }
}
