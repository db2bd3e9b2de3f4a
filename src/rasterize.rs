//! PDF → page images.
//!
//! [`rasterize_pdf`] validates the input, renders every selected page in one
//! engine call, creates the output directory and then writes each page.
//! A page that fails to save is recorded in the report and the remaining
//! pages are still written.

use crate::config::{OutputFormat, RasterConfig};
use crate::error::{PageError, PdfOcrError};
use crate::output::{PageOutcome, RasterReport};
use crate::pipeline::render::{PageRasterizer, PdfiumRasterizer, RenderedPage};
use crate::pipeline::{encode, input};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Rasterise a PDF with pdfium.
///
/// Binds the pdfium library and delegates to [`rasterize_pdf`]. The input is
/// checked before binding so a missing file reports as such even when pdfium
/// is unavailable.
pub fn pdf_to_images(
    pdf_path: impl AsRef<Path>,
    config: &RasterConfig,
) -> Result<RasterReport, PdfOcrError> {
    let pdf_path = input::resolve_pdf(pdf_path.as_ref())?;
    let rasterizer = PdfiumRasterizer::bind()?;
    rasterize_pdf(&pdf_path, config, &rasterizer)
}

/// Rasterise a PDF into `page_NNN.<fmt>` files using `rasterizer`.
///
/// # Returns
/// `Ok(RasterReport)` once rendering succeeded, even if some pages could not
/// be saved (check [`RasterReport::failed_pages`]).
///
/// # Errors
/// Fatal errors only: missing or non-PDF input, rendering failure, output
/// directory creation failure. Nothing is written in any of these cases,
/// except that a directory-creation error may leave parent directories.
pub fn rasterize_pdf(
    pdf_path: impl AsRef<Path>,
    config: &RasterConfig,
    rasterizer: &dyn PageRasterizer,
) -> Result<RasterReport, PdfOcrError> {
    let total_start = Instant::now();

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let pdf_path = input::resolve_pdf(pdf_path.as_ref())?;
    let output_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| input::image_output_dir(&pdf_path));

    info!("PDF loaded: {}", pdf_path.display());
    info!("Output directory: {}", output_dir.display());
    info!("Settings: DPI = {}, Format = {}", config.dpi, config.format);

    // ── Step 2: Render every selected page ───────────────────────────────
    info!("Starting conversion of PDF to images...");
    let render_start = Instant::now();
    let rendered = rasterizer.render(&pdf_path, config)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    debug!(
        "Rendered {} of {} pages in {}ms",
        rendered.pages.len(),
        rendered.total_pages,
        render_duration_ms
    );

    // ── Step 3: Output directory (reused if present) ─────────────────────
    std::fs::create_dir_all(&output_dir).map_err(|source| PdfOcrError::OutputDirFailed {
        path: output_dir.clone(),
        source,
    })?;

    // ── Step 4: Save pages one by one ────────────────────────────────────
    let pages: Vec<PageOutcome> = rendered
        .pages
        .iter()
        .map(|page| save_one(page, &output_dir, config.format))
        .collect();

    let report = RasterReport {
        pdf_path,
        output_dir,
        dpi: config.dpi,
        format: config.format,
        total_pages: rendered.total_pages,
        pages,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    if report.failed_pages() == 0 {
        info!(
            "Done: {} pages converted successfully into '{}'.",
            report.saved_pages(),
            report.output_dir.display()
        );
    } else {
        warn!(
            "Done: {}/{} pages converted into '{}' ({} failed).",
            report.saved_pages(),
            report.pages.len(),
            report.output_dir.display(),
            report.failed_pages()
        );
    }

    Ok(report)
}

fn save_one(page: &RenderedPage, output_dir: &Path, format: OutputFormat) -> PageOutcome {
    let file_name = encode::page_file_name(page.page_num, format);
    let path = output_dir.join(&file_name);

    info!("Processing page {}...", page.page_num);
    match encode::save_page(&page.image, &path, format) {
        Ok(_) => {
            info!("Page {} saved as: {}", page.page_num, file_name);
            PageOutcome::Saved {
                page_num: page.page_num,
                path,
            }
        }
        Err(e) => {
            let err = PageError::SaveFailed {
                page: page.page_num,
                path,
                detail: e.to_string(),
            };
            warn!("{}", err);
            PageOutcome::Failed(err)
        }
    }
}
