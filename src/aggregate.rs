//! Image folder → one text file.
//!
//! [`ocr_directory`] lists the folder's images in file-name order, recognises
//! each one independently and writes the surviving blocks behind page markers
//! to `<dir-name>.txt` next to the folder.

use crate::config::OcrConfig;
use crate::error::{PageError, PdfOcrError};
use crate::output::{ImageOutcome, OcrReport, RecognitionResult};
use crate::pipeline::recognize::{TesseractRecognizer, TextRecognizer};
use crate::pipeline::{assemble, input};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// OCR a folder with the Tesseract CLI described by `config`.
///
/// The folder is checked before Tesseract is asked for its version, so a
/// bad path is reported on its own.
pub fn images_to_text(
    input_dir: impl AsRef<Path>,
    config: &OcrConfig,
) -> Result<OcrReport, PdfOcrError> {
    let input_dir = input::resolve_image_dir(input_dir.as_ref())?;

    let recognizer = TesseractRecognizer::new(config);
    match recognizer.version() {
        Ok(version) => debug!("Using {}", version),
        Err(e) => warn!("Tesseract does not answer --version: {}", e),
    }
    ocr_directory(&input_dir, config, &recognizer)
}

/// OCR every `.png` / `.jpg` / `.jpeg` file in `input_dir` using `recognizer`.
///
/// Images are processed in lexicographic file-name order, and that order is
/// the page order of the output. Name files so they sort the way they should
/// read (`page_001.png`, `page_002.png`, …).
///
/// # Returns
/// `Ok(OcrReport)` once the output file is written, even if some or all
/// images failed recognition. Failed images contribute no block.
///
/// # Errors
/// - [`PdfOcrError::DirectoryNotFound`] — no such directory
/// - [`PdfOcrError::NoImagesFound`] — nothing to recognise
/// - [`PdfOcrError::OutputWriteFailed`] — the text file could not be written
///
/// No output file exists after the first two.
pub fn ocr_directory(
    input_dir: impl AsRef<Path>,
    config: &OcrConfig,
    recognizer: &dyn TextRecognizer,
) -> Result<OcrReport, PdfOcrError> {
    let total_start = Instant::now();

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let input_dir = input::resolve_image_dir(input_dir.as_ref())?;
    let images = input::list_images(&input_dir)?;
    if images.is_empty() {
        return Err(PdfOcrError::NoImagesFound { path: input_dir });
    }

    let output_path = match &config.output_path {
        Some(path) => path.clone(),
        None => input::text_output_path(&input_dir)?,
    };

    info!("{} image(s) found for OCR.", images.len());

    // ── Step 2: Recognise each image independently ───────────────────────
    let outcomes: Vec<ImageOutcome> = images
        .iter()
        .enumerate()
        .map(|(i, path)| recognize_one(recognizer, i + 1, path))
        .collect();

    // ── Step 3: Assemble and write ───────────────────────────────────────
    let recognized = outcomes.iter().filter_map(|o| match o {
        ImageOutcome::Recognized(r) => Some(r),
        ImageOutcome::Failed(_) => None,
    });
    let text = assemble::assemble_text(recognized);
    write_atomically(&output_path, &text)?;

    let report = OcrReport {
        input_dir,
        output_path,
        lang: config.lang.clone(),
        images: outcomes,
        output_bytes: text.len(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    if report.failed_count() > 0 {
        warn!(
            "{} of {} image(s) could not be recognised.",
            report.failed_count(),
            report.images.len()
        );
    }
    info!(
        "OCR complete. Output saved to: {}",
        report.output_path.display()
    );

    Ok(report)
}

fn recognize_one(recognizer: &dyn TextRecognizer, index: usize, path: &Path) -> ImageOutcome {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!("Performing OCR on {} ...", file_name);
    match recognizer.recognize(path) {
        Ok(text) => ImageOutcome::Recognized(RecognitionResult {
            index,
            file_name,
            text: text.trim().to_string(),
        }),
        Err(e) => {
            let err = PageError::RecognitionFailed {
                index,
                file_name,
                detail: e.to_string(),
            };
            warn!("{}", err);
            ImageOutcome::Failed(err)
        }
    }
}

/// Write to a fresh temp file beside `path`, then move it over `path`.
///
/// The temp file is removed if anything fails before the move.
fn write_atomically(path: &Path, contents: &str) -> Result<(), PdfOcrError> {
    let write_failed = |source: std::io::Error| PdfOcrError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same mode as a plain `fs::write`, before the umask.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_failed)?;
    tmp.write_all(contents.as_bytes()).map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}
