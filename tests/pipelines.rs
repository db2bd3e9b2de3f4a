//! Pipeline tests with in-process engines.
//!
//! A fake [`PageRasterizer`] hands back solid-colour bitmaps and a fake
//! [`TextRecognizer`] returns canned text, so these run without pdfium or
//! tesseract installed.

use image::{DynamicImage, Rgba, RgbaImage};
use pdf_ocr_tools::{
    ocr_directory, rasterize_pdf, ImageOutcome, OcrConfig, OutputFormat, PageOutcome,
    PageRasterizer, PageSelection, PdfOcrError, RasterConfig, RecognizeError, RenderedDocument,
    RenderedPage, TextRecognizer,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Renders `pages` blank pages, honouring the page selection.
struct FakeRasterizer {
    pages: usize,
}

impl PageRasterizer for FakeRasterizer {
    fn render(&self, _pdf: &Path, config: &RasterConfig) -> Result<RenderedDocument, PdfOcrError> {
        let pages = config
            .pages
            .to_indices(self.pages)
            .into_iter()
            .map(|idx| RenderedPage {
                page_num: idx + 1,
                image: DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                    8,
                    8,
                    Rgba([255, 255, 255, 255]),
                )),
            })
            .collect();
        Ok(RenderedDocument {
            total_pages: self.pages,
            pages,
        })
    }
}

/// Always fails, like pdfium on a damaged file.
struct BrokenRasterizer;

impl PageRasterizer for BrokenRasterizer {
    fn render(&self, pdf: &Path, _config: &RasterConfig) -> Result<RenderedDocument, PdfOcrError> {
        Err(PdfOcrError::CorruptPdf {
            path: pdf.to_path_buf(),
            detail: "xref table damaged".into(),
        })
    }
}

/// Returns `"  text of <file>\n"` and fails for any file name in `fail_on`.
#[derive(Default)]
struct FakeRecognizer {
    fail_on: HashSet<String>,
    seen: RefCell<Vec<String>>,
}

impl FakeRecognizer {
    fn failing_on(names: &[&str]) -> Self {
        Self {
            fail_on: names.iter().map(|s| s.to_string()).collect(),
            seen: RefCell::default(),
        }
    }
}

impl TextRecognizer for FakeRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String, RecognizeError> {
        let name = image_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        self.seen.borrow_mut().push(name.clone());
        if self.fail_on.contains(&name) {
            return Err(RecognizeError::Unreadable(format!("{name} is corrupt")));
        }
        Ok(format!("  text of {name}\n"))
    }
}

/// Route the pipelines' log lines through the test harness's capture.
fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// `<tmp>/<name>` containing a minimal PDF header.
fn write_pdf(dir: &TempDir, name: &str) -> PathBuf {
    init_logs();
    let path = dir.path().join(name);
    fs::write(&path, b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n").unwrap();
    path
}

/// `<tmp>/<folder>/` holding empty files with the given names.
fn image_folder(dir: &TempDir, folder: &str, names: &[&str]) -> PathBuf {
    init_logs();
    let path = dir.path().join(folder);
    fs::create_dir(&path).unwrap();
    for name in names {
        fs::write(path.join(name), b"").unwrap();
    }
    path
}

fn sorted_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ── Rasterizer ───────────────────────────────────────────────────────────────

#[test]
fn rasterizer_writes_one_file_per_page() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "report.pdf");

    let report = rasterize_pdf(&pdf, &RasterConfig::default(), &FakeRasterizer { pages: 3 })
        .expect("rasterize should succeed");

    let out_dir = tmp.path().join("report_images");
    assert_eq!(report.output_dir, fs::canonicalize(&out_dir).unwrap());
    assert_eq!(
        sorted_file_names(&out_dir),
        vec!["page_001.png", "page_002.png", "page_003.png"]
    );
    assert_eq!(report.saved_pages(), 3);
    assert_eq!(report.failed_pages(), 0);
    assert_eq!(report.total_pages, 3);
}

#[test]
fn rerun_reuses_existing_directory() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "report.pdf");
    let config = RasterConfig::default();
    let engine = FakeRasterizer { pages: 2 };

    rasterize_pdf(&pdf, &config, &engine).expect("first run");
    let second = rasterize_pdf(&pdf, &config, &engine).expect("second run");

    assert_eq!(second.saved_pages(), 2);
    assert_eq!(sorted_file_names(&second.output_dir).len(), 2);
}

#[test]
fn missing_pdf_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let pdf = tmp.path().join("ghost.pdf");

    let err = rasterize_pdf(&pdf, &RasterConfig::default(), &FakeRasterizer { pages: 1 })
        .unwrap_err();

    assert!(matches!(err, PdfOcrError::FileNotFound { .. }), "got: {err}");
    assert!(!tmp.path().join("ghost_images").exists());
    assert!(sorted_file_names(tmp.path()).is_empty());
}

#[test]
fn render_failure_aborts_without_output() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "broken.pdf");

    let err = rasterize_pdf(&pdf, &RasterConfig::default(), &BrokenRasterizer).unwrap_err();

    assert!(matches!(err, PdfOcrError::CorruptPdf { .. }));
    assert!(!tmp.path().join("broken_images").exists());
}

#[test]
fn format_choice_sets_every_extension() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "scan.pdf");
    let config = RasterConfig::builder()
        .format(OutputFormat::Jpeg)
        .build()
        .unwrap();

    let report = rasterize_pdf(&pdf, &config, &FakeRasterizer { pages: 4 }).unwrap();

    let names = sorted_file_names(&report.output_dir);
    assert_eq!(names.len(), 4);
    assert!(names.iter().all(|n| n.ends_with(".jpeg")), "got: {names:?}");
    // JPEG output must decode even though the source bitmaps carry alpha.
    assert!(image::open(report.output_dir.join("page_001.jpeg")).is_ok());
}

#[test]
fn one_page_failing_to_save_does_not_stop_the_rest() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "doc.pdf");
    // A directory squatting on page 2's file name makes that write fail.
    fs::create_dir_all(tmp.path().join("doc_images").join("page_002.png")).unwrap();

    let report = rasterize_pdf(&pdf, &RasterConfig::default(), &FakeRasterizer { pages: 3 })
        .expect("per-page failures are not fatal");

    assert_eq!(report.saved_pages(), 2);
    assert_eq!(report.failed_pages(), 1);
    assert!(matches!(report.pages[1], PageOutcome::Failed(_)));
    assert!(report.output_dir.join("page_003.png").is_file());
}

#[test]
fn page_selection_keeps_document_page_numbers() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "book.pdf");
    let config = RasterConfig::builder()
        .pages(PageSelection::Range(2, 3))
        .build()
        .unwrap();

    let report = rasterize_pdf(&pdf, &config, &FakeRasterizer { pages: 5 }).unwrap();

    assert_eq!(
        sorted_file_names(&report.output_dir),
        vec!["page_002.png", "page_003.png"]
    );
    assert_eq!(report.total_pages, 5);
}

#[test]
fn output_dir_override_is_honoured() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "doc.pdf");
    let target = tmp.path().join("custom").join("pages");
    let config = RasterConfig::builder().output_dir(&target).build().unwrap();

    rasterize_pdf(&pdf, &config, &FakeRasterizer { pages: 1 }).unwrap();

    assert!(target.join("page_001.png").is_file());
    assert!(!tmp.path().join("doc_images").exists());
}

// ── OCR aggregator ───────────────────────────────────────────────────────────

#[test]
fn aggregator_orders_blocks_by_file_name() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "scans", &["c.jpeg", "a.png", "b.jpg"]);
    let recognizer = FakeRecognizer::default();

    let report = ocr_directory(&folder, &OcrConfig::default(), &recognizer).unwrap();

    let out = tmp.path().join("scans.txt");
    assert_eq!(report.output_path, out);
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "\n\n===== Page 1 : a.png =====\n\ntext of a.png\n\
         \n\n===== Page 2 : b.jpg =====\n\ntext of b.jpg\n\
         \n\n===== Page 3 : c.jpeg =====\n\ntext of c.jpeg"
    );
    assert_eq!(*recognizer.seen.borrow(), vec!["a.png", "b.jpg", "c.jpeg"]);
    assert_eq!(report.recognized_count(), 3);
    assert_eq!(report.output_bytes, text.len());
}

#[test]
fn aggregator_ignores_other_extensions() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "mixed", &["page.PNG", "notes.txt", "page.tiff"]);
    let recognizer = FakeRecognizer::default();

    let report = ocr_directory(&folder, &OcrConfig::default(), &recognizer).unwrap();

    assert_eq!(report.images.len(), 1);
    assert_eq!(*recognizer.seen.borrow(), vec!["page.PNG"]);
}

#[test]
fn empty_folder_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "empty", &[]);

    let err = ocr_directory(&folder, &OcrConfig::default(), &FakeRecognizer::default())
        .unwrap_err();

    assert!(matches!(err, PdfOcrError::NoImagesFound { .. }));
    assert!(!tmp.path().join("empty.txt").exists());
}

#[test]
fn folder_without_images_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "docs", &["readme.md", "scan.tiff"]);

    let err = ocr_directory(&folder, &OcrConfig::default(), &FakeRecognizer::default())
        .unwrap_err();

    assert!(matches!(err, PdfOcrError::NoImagesFound { .. }));
    assert!(!tmp.path().join("docs.txt").exists());
}

#[test]
fn missing_folder_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let err = ocr_directory(
        tmp.path().join("nowhere"),
        &OcrConfig::default(),
        &FakeRecognizer::default(),
    )
    .unwrap_err();

    assert!(matches!(err, PdfOcrError::DirectoryNotFound { .. }));
    assert!(sorted_file_names(tmp.path()).is_empty());
}

#[test]
fn one_recognition_failure_drops_only_that_block() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "scans", &["a.png", "b.png", "c.png"]);
    let recognizer = FakeRecognizer::failing_on(&["b.png"]);

    let report = ocr_directory(&folder, &OcrConfig::default(), &recognizer)
        .expect("run completes despite one failure");

    let text = fs::read_to_string(&report.output_path).unwrap();
    assert_eq!(text.matches("===== Page").count(), 2);
    assert!(text.contains("===== Page 1 : a.png ====="));
    assert!(text.contains("===== Page 3 : c.png ====="));
    assert!(!text.contains("b.png"));

    assert_eq!(report.recognized_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert!(matches!(report.images[1], ImageOutcome::Failed(_)));
}

#[test]
fn all_recognitions_failing_still_writes_file() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "scans", &["a.png", "b.png"]);
    let recognizer = FakeRecognizer::failing_on(&["a.png", "b.png"]);

    let report = ocr_directory(&folder, &OcrConfig::default(), &recognizer).unwrap();

    assert_eq!(report.recognized_count(), 0);
    assert_eq!(fs::read_to_string(&report.output_path).unwrap(), "");
}

#[test]
fn trailing_separator_still_writes_next_to_folder() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "pages", &["page_001.png"]);
    let with_slash = PathBuf::from(format!("{}/", folder.display()));

    ocr_directory(&with_slash, &OcrConfig::default(), &FakeRecognizer::default()).unwrap();

    assert!(tmp.path().join("pages.txt").is_file());
    assert!(!folder.join("pages.txt").exists());
}

#[cfg(unix)]
#[test]
fn symlinked_folder_is_named_as_given() {
    let tmp = TempDir::new().unwrap();
    let real = image_folder(&tmp, "real_scans", &["a.png"]);
    let work = tmp.path().join("work");
    fs::create_dir(&work).unwrap();
    let link = work.join("chapter1");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let report = ocr_directory(&link, &OcrConfig::default(), &FakeRecognizer::default()).unwrap();

    assert_eq!(report.output_path, work.join("chapter1.txt"));
    assert!(work.join("chapter1.txt").is_file());
    assert!(!tmp.path().join("real_scans.txt").exists());
}

#[test]
fn output_path_override_is_honoured() {
    let tmp = TempDir::new().unwrap();
    let folder = image_folder(&tmp, "scans", &["a.png"]);
    let target = tmp.path().join("result.txt");
    let config = OcrConfig::builder().output_path(&target).build().unwrap();

    ocr_directory(&folder, &config, &FakeRecognizer::default()).unwrap();

    assert!(target.is_file());
    assert!(!tmp.path().join("scans.txt").exists());
}

// ── Both pipelines ───────────────────────────────────────────────────────────

#[test]
fn rasterized_pages_feed_the_aggregator_in_page_order() {
    let tmp = TempDir::new().unwrap();
    let pdf = write_pdf(&tmp, "thesis.pdf");

    let raster = rasterize_pdf(&pdf, &RasterConfig::default(), &FakeRasterizer { pages: 12 })
        .unwrap();
    let recognizer = FakeRecognizer::default();
    let ocr = ocr_directory(&raster.output_dir, &OcrConfig::default(), &recognizer).unwrap();

    let expected: Vec<String> = (1..=12).map(|n| format!("page_{n:03}.png")).collect();
    assert_eq!(*recognizer.seen.borrow(), expected);
    assert_eq!(ocr.output_path, tmp.path().canonicalize().unwrap().join("thesis_images.txt"));
}
