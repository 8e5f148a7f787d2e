//! Text extraction: flatten a parsed document into one linear string.
//!
//! Runs on a page are joined by a single space and pages by a single
//! newline. A page with no runs contributes an empty string but still gets
//! its separator, so an N-page document always adds exactly N−1 newlines.
//! Whitespace, case and Unicode are left untouched here; the sentence
//! selector deals with noise.

use crate::document::{ExtractedText, Page, ParsedDocument};
use tracing::debug;

/// Separator between runs on the same page.
pub const RUN_SEPARATOR: &str = " ";

/// Separator between pages.
pub const PAGE_SEPARATOR: &str = "\n";

/// Concatenate every page of `doc`, preserving page and run order.
pub fn extract(doc: &ParsedDocument) -> ExtractedText {
    let text = join_pages(doc.pages.iter().map(Page::text));
    debug!(
        "Extracted {} bytes from {} pages",
        text.len(),
        doc.page_count()
    );
    ExtractedText::new(text)
}

/// Join already-flattened page strings with [`PAGE_SEPARATOR`].
pub fn join_pages(pages: impl IntoIterator<Item = String>) -> String {
    pages.into_iter().collect::<Vec<_>>().join(PAGE_SEPARATOR)
}
