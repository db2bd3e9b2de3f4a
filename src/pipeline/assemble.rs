//! Text assembly: recognised blocks → one document with page markers.
//!
//! Each block is a blank line pair, the marker line, a blank line pair and
//! the trimmed text; blocks are joined with a single newline:
//!
//! ```text
//!
//!
//! ===== Page 1 : a.png =====
//!
//! first page text
//!
//!
//! ===== Page 2 : b.jpg =====
//!
//! second page text
//! ```

use crate::output::RecognitionResult;

/// The delimiter line that opens a block.
pub fn page_marker(index: usize, file_name: &str) -> String {
    format!("===== Page {} : {} =====", index, file_name)
}

/// One block: marker plus text.
pub fn render_block(result: &RecognitionResult) -> String {
    format!(
        "\n\n{}\n\n{}",
        page_marker(result.index, &result.file_name),
        result.text
    )
}

/// Join blocks in the order given.
pub fn assemble_text<'a>(results: impl IntoIterator<Item = &'a RecognitionResult>) -> String {
    results
        .into_iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}
