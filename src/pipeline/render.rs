//! PDF rasterisation: render selected pages to `DynamicImage` via pdfium.
//!
//! Rendering is all-or-nothing. Every selected page is rendered into memory
//! before anything is written, so a corrupt document or a page pdfium cannot
//! draw aborts the run with no partial output on disk.
//!
//! PDF user space is 72 points per inch; a page is scaled by `dpi / 72` to
//! reach the requested resolution.

use crate::config::{PageSelection, RasterConfig};
use crate::error::PdfOcrError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit pdfium library file.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Points per inch in PDF user space.
const POINTS_PER_INCH: f32 = 72.0;

/// One rendered page held in memory.
pub struct RenderedPage {
    /// 1-based page number within the document.
    pub page_num: usize,
    pub image: DynamicImage,
}

/// All pages produced by one rasterisation call.
pub struct RenderedDocument {
    /// Page count of the whole document, regardless of selection.
    pub total_pages: usize,
    /// Rendered pages in ascending page order.
    pub pages: Vec<RenderedPage>,
}

/// A PDF rasterisation engine.
///
/// Implementations render every page selected by `config.pages` at
/// `config.dpi`, or fail as a whole.
pub trait PageRasterizer {
    fn render(&self, pdf_path: &Path, config: &RasterConfig)
        -> Result<RenderedDocument, PdfOcrError>;
}

/// [`PageRasterizer`] backed by a dynamically bound pdfium library.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind to pdfium.
    ///
    /// Lookup order: the file named by `PDFIUM_LIB_PATH`, then the platform
    /// library in the working directory, then the system library.
    pub fn bind() -> Result<Self, PdfOcrError> {
        let bindings = match std::env::var_os(PDFIUM_LIB_PATH_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                debug!("Binding pdfium from {}", path.display());
                Pdfium::bind_to_library(&path)
            }
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|e| PdfOcrError::PdfiumBindingFailed(e.to_string()))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn render(
        &self,
        pdf_path: &Path,
        config: &RasterConfig,
    ) -> Result<RenderedDocument, PdfOcrError> {
        let password = config.password.as_deref();
        let document = self
            .pdfium
            .load_pdf_from_file(pdf_path, password)
            .map_err(|e| classify_load_error(pdf_path, password.is_some(), format!("{:?}", e)))?;

        let pages = document.pages();
        let total_pages = pages.len() as usize;
        info!("PDF opened: {} pages", total_pages);

        let indices = config.pages.to_indices(total_pages);
        if indices.is_empty() && config.pages != PageSelection::All {
            return Err(PdfOcrError::PageOutOfRange { total: total_pages });
        }

        let render_config =
            PdfRenderConfig::new().scale_page_by_factor(config.dpi as f32 / POINTS_PER_INCH);

        let mut rendered = Vec::with_capacity(indices.len());

        for idx in indices {
            let page = pages
                .get(idx as u16)
                .map_err(|e| PdfOcrError::RasterisationFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                })?;

            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                PdfOcrError::RasterisationFailed {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                }
            })?;

            let image = bitmap.as_image();
            debug!(
                "Rendered page {} → {}x{} px",
                idx + 1,
                image.width(),
                image.height()
            );

            rendered.push(RenderedPage {
                page_num: idx + 1,
                image,
            });
        }

        Ok(RenderedDocument {
            total_pages,
            pages: rendered,
        })
    }
}

/// Map a pdfium load failure onto the password / corruption variants.
fn classify_load_error(pdf_path: &Path, had_password: bool, detail: String) -> PdfOcrError {
    if detail.contains("Password") || detail.contains("password") {
        if had_password {
            PdfOcrError::WrongPassword {
                path: pdf_path.to_path_buf(),
            }
        } else {
            PdfOcrError::PasswordRequired {
                path: pdf_path.to_path_buf(),
            }
        }
    } else {
        warn!("pdfium could not load {}: {}", pdf_path.display(), detail);
        PdfOcrError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail,
        }
    }
}
