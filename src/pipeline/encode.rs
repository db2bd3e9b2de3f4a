//! Image encoding: `DynamicImage` → `page_NNN.<fmt>` on disk.
//!
//! pdfium hands back RGBA bitmaps. PNG and TIFF store them as-is; JPEG has no
//! alpha channel, so the page is flattened to RGB first.

use crate::config::OutputFormat;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// `page_001.png`, `page_042.jpeg`, … Page numbers are 1-based and padded to
/// three digits so lexicographic order equals page order up to page 999.
pub fn page_file_name(page_num: usize, format: OutputFormat) -> String {
    format!("page_{:03}.{}", page_num, format.extension())
}

/// Encode `img` as `format` and write it to `path`.
///
/// Encoding happens in memory first, so an encoder failure never leaves a
/// truncated file behind. Returns the number of bytes written.
pub fn save_page(
    img: &DynamicImage,
    path: &Path,
    format: OutputFormat,
) -> Result<usize, image::ImageError> {
    let mut buf = Vec::new();
    match format.image_format() {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?,
        other => img.write_to(&mut Cursor::new(&mut buf), other)?,
    }

    std::fs::write(path, &buf).map_err(image::ImageError::IoError)?;
    debug!("Encoded {} → {} bytes", path.display(), buf.len());

    Ok(buf.len())
}
