//! Pipeline stages shared by the rasterizer and the OCR aggregator.
//!
//! ## Data Flow
//!
//! ```text
//! rasterizer:  input ──▶ render ──▶ encode            (PDF → page_NNN.<fmt>)
//! aggregator:  input ──▶ recognize ──▶ assemble       (folder → <dir>.txt)
//! ```
//!
//! 1. [`input`]     — validate the PDF / image folder and derive output paths
//! 2. [`render`]    — rasterise every selected page into memory via pdfium
//! 3. [`encode`]    — encode one page image and write it to disk
//! 4. [`recognize`] — run the OCR engine on one image file
//! 5. [`assemble`]  — join recognised text blocks behind page markers
//!
//! The engine stages sit behind the [`render::PageRasterizer`] and
//! [`recognize::TextRecognizer`] traits so the orchestration can be exercised
//! without pdfium or tesseract installed.

pub mod assemble;
pub mod encode;
pub mod input;
pub mod recognize;
pub mod render;
