//! Input resolution: validate user-supplied paths and derive output locations.
//!
//! The PDF path is canonicalised. The image folder is only made absolute,
//! without following symlinks, so its output file is named after the folder
//! as the user typed it.

use crate::error::PdfOcrError;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Extensions picked up by the OCR aggregator (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// PDF readers accept the header anywhere in the first kilobyte.
const PDF_HEADER: &[u8] = b"%PDF-";
const HEADER_SCAN_LEN: u64 = 1024;

/// Resolve a local PDF path, validating existence, readability and the
/// `%PDF-` header.
///
/// Returns the canonical path.
pub fn resolve_pdf(path: &Path) -> Result<PathBuf, PdfOcrError> {
    if !path.is_file() {
        return Err(PdfOcrError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(f) => {
            let mut head = Vec::new();
            let read = f.take(HEADER_SCAN_LEN).read_to_end(&mut head);
            if read.is_err() || !head.windows(PDF_HEADER.len()).any(|w| w == PDF_HEADER) {
                let mut magic = [0u8; 4];
                let n = head.len().min(magic.len());
                magic[..n].copy_from_slice(&head[..n]);
                return Err(PdfOcrError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(PdfOcrError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(PdfOcrError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    let canonical = std::fs::canonicalize(path).map_err(|_| PdfOcrError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    debug!("Resolved local PDF: {}", canonical.display());
    Ok(canonical)
}

/// `<parent>/<stem>_images` for a PDF at `<parent>/<stem>.pdf`.
pub fn image_output_dir(pdf_path: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let parent = pdf_path.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{stem}_images"))
}

/// Resolve an image folder to an absolute path.
///
/// Symlinks are not followed. `.` components and trailing separators are
/// dropped; `..` is kept for the OS to resolve.
pub fn resolve_image_dir(dir: &Path) -> Result<PathBuf, PdfOcrError> {
    if !dir.is_dir() {
        return Err(PdfOcrError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let absolute = std::path::absolute(dir).map_err(|_| PdfOcrError::DirectoryNotFound {
        path: dir.to_path_buf(),
    })?;
    Ok(absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

/// True when `path` ends in one of [`IMAGE_EXTENSIONS`], ignoring case.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// List the image files directly inside `dir`, sorted by file name.
///
/// Sort order is plain lexicographic order of the file names and it *is* the
/// page order of the aggregated text: `page_10.png` sorts before
/// `page_2.png`. Zero-padded names, as written by the rasterizer, keep
/// lexicographic and numeric order identical.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, PdfOcrError> {
    let unreadable = |source: std::io::Error| PdfOcrError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if path.is_file() && has_image_extension(&path) {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} image file(s) in {}", images.len(), dir.display());
    Ok(images)
}

/// `<parent>/<dir-name>.txt` for an image folder at `<parent>/<dir-name>`.
///
/// Expects an absolute path. A filesystem root, or a path ending in `..`, has
/// no name to derive from.
pub fn text_output_path(dir: &Path) -> Result<PathBuf, PdfOcrError> {
    match (dir.parent(), dir.file_name()) {
        (Some(parent), Some(name)) => {
            let mut file_name = name.to_os_string();
            file_name.push(".txt");
            Ok(parent.join(file_name))
        }
        _ => Err(PdfOcrError::InvalidConfig(format!(
            "Cannot derive an output file name for {:?}; pass an explicit output path",
            dir
        ))),
    }
}
