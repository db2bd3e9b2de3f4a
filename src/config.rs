//! Configuration types for both pipelines.
//!
//! [`RasterConfig`] drives the PDF rasterizer, [`OcrConfig`] drives the OCR
//! aggregator. Each is built through a builder that clamps or validates its
//! inputs, and each has a `Default` matching the command-line defaults.

use crate::error::PdfOcrError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Accepted DPI range. PDF user space is 72 units per inch, so 72 is 1:1.
pub const DPI_RANGE: std::ops::RangeInclusive<u32> = 1..=1200;

/// Default Tesseract language.
pub const DEFAULT_LANG: &str = "eng";

// ── Rasterizer ───────────────────────────────────────────────────────────

/// Configuration for rasterising a PDF into page images.
///
/// # Example
/// ```rust
/// use pdf_ocr_tools::{OutputFormat, RasterConfig};
///
/// let config = RasterConfig::builder()
///     .dpi(150)
///     .format(OutputFormat::Jpeg)
///     .build()
///     .unwrap();
/// assert_eq!(config.format.extension(), "jpeg");
/// ```
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Rendering resolution in dots per inch. Default: 300.
    pub dpi: u32,

    /// Encoding of the written page files. Default: PNG.
    pub format: OutputFormat,

    /// Pages to render. Default: all pages.
    pub pages: PageSelection,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Destination directory. Default: `<pdf-stem>_images` next to the PDF.
    pub output_dir: Option<PathBuf>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            format: OutputFormat::default(),
            pages: PageSelection::default(),
            password: None,
            output_dir: None,
        }
    }
}

impl RasterConfig {
    /// Create a new builder for `RasterConfig`.
    pub fn builder() -> RasterConfigBuilder {
        RasterConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RasterConfig`].
#[derive(Debug)]
pub struct RasterConfigBuilder {
    config: RasterConfig,
}

impl RasterConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RasterConfig, PdfOcrError> {
        let c = &self.config;
        if !DPI_RANGE.contains(&c.dpi) {
            return Err(PdfOcrError::InvalidConfig(format!(
                "DPI must be {}–{}, got {}",
                DPI_RANGE.start(),
                DPI_RANGE.end(),
                c.dpi
            )));
        }
        if let PageSelection::Range(start, end) = c.pages {
            if start == 0 || start > end {
                return Err(PdfOcrError::InvalidConfig(format!(
                    "Invalid page range {start}-{end}"
                )));
            }
        }
        Ok(self.config)
    }
}

// ── OCR ──────────────────────────────────────────────────────────────────

/// Configuration for OCR over an image folder.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language code(s), e.g. `eng`, `fra`, `eng+deu`. Default: `eng`.
    pub lang: String,

    /// Tesseract executable. Default: `tesseract` (looked up on `PATH`).
    pub tesseract: PathBuf,

    /// Directory holding the `.traineddata` files. Passed as `TESSDATA_PREFIX`.
    pub tessdata_dir: Option<PathBuf>,

    /// Page segmentation mode (`--psm`, 0–13). Default: Tesseract's own.
    pub psm: Option<u8>,

    /// Destination text file. Default: `<dir-name>.txt` next to the folder.
    pub output_path: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            tesseract: PathBuf::from("tesseract"),
            tessdata_dir: None,
            psm: None,
            output_path: None,
        }
    }
}

impl OcrConfig {
    /// Create a new builder for `OcrConfig`.
    pub fn builder() -> OcrConfigBuilder {
        OcrConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`OcrConfig`].
#[derive(Debug)]
pub struct OcrConfigBuilder {
    config: OcrConfig,
}

impl OcrConfigBuilder {
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.config.lang = lang.into();
        self
    }

    pub fn tesseract(mut self, binary: impl Into<PathBuf>) -> Self {
        self.config.tesseract = binary.into();
        self
    }

    pub fn tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.tessdata_dir = Some(dir.into());
        self
    }

    pub fn psm(mut self, psm: u8) -> Self {
        self.config.psm = Some(psm);
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<OcrConfig, PdfOcrError> {
        let c = &self.config;
        if c.lang.trim().is_empty() {
            return Err(PdfOcrError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if let Some(psm) = c.psm {
            if psm > 13 {
                return Err(PdfOcrError::InvalidConfig(format!(
                    "Page segmentation mode must be 0–13, got {psm}"
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Image encoding for rendered pages.
///
/// `Jpeg` and `Jpg` encode identically; they differ only in the file
/// extension written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Jpg,
    Tiff,
}

impl OutputFormat {
    /// File extension, exactly as the user named the format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// The `image` crate encoder used for this format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg | OutputFormat::Jpg => image::ImageFormat::Jpeg,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = PdfOcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" => Ok(OutputFormat::Jpeg),
            "jpg" => Ok(OutputFormat::Jpg),
            "tiff" => Ok(OutputFormat::Tiff),
            other => Err(PdfOcrError::InvalidConfig(format!(
                "Unsupported image format '{other}' (expected png, jpeg, jpg or tiff)"
            ))),
        }
    }
}

/// Specifies which pages of the PDF to render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// Render all pages (default).
    #[default]
    All,
    /// Render a single page (1-indexed).
    Single(usize),
    /// Render a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Render specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// 0-based indices of the selected pages that exist in a `total_pages`
    /// document, ascending and without repeats.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let wanted: BTreeSet<usize> = match self {
            PageSelection::All => (1..=total_pages).collect(),
            PageSelection::Single(page) => BTreeSet::from([*page]),
            PageSelection::Range(first, last) => {
                ((*first).max(1)..=(*last).min(total_pages)).collect()
            }
            PageSelection::Set(pages) => pages.iter().copied().collect(),
        };
        wanted
            .into_iter()
            .filter(|page| (1..=total_pages).contains(page))
            .map(|page| page - 1)
            .collect()
    }
}

impl FromStr for PageSelection {
    type Err = PdfOcrError;

    /// Parse `all`, `5`, `3-15` or `1,3,5,7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let invalid = |msg: String| PdfOcrError::InvalidConfig(msg);
        let page = |p: &str| -> Result<usize, PdfOcrError> {
            let n: usize = p
                .trim()
                .parse()
                .map_err(|_| invalid(format!("Invalid page number: '{}'", p.trim())))?;
            if n < 1 {
                return Err(invalid(format!(
                    "Pages are 1-indexed, minimum is 1 (got {n})"
                )));
            }
            Ok(n)
        };

        if s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            let (start, end) = (page(start)?, page(end)?);
            if start > end {
                return Err(invalid(format!(
                    "Invalid page range '{start}-{end}': start must be <= end"
                )));
            }
            return Ok(PageSelection::Range(start, end));
        }

        if s.contains(',') {
            let pages = s.split(',').map(&page).collect::<Result<Vec<_>, _>>()?;
            return Ok(PageSelection::Set(pages));
        }

        Ok(PageSelection::Single(page(&s)?))
    }
}
