//! Finding the page an anchor label is on.

use crate::error::PdfError;
use crate::models::Document;
use crate::pdf::DocumentBackend;

/// Index of the first page whose text contains `label`, ignoring case.
pub fn find_anchor_page<S: AsRef<str>>(pages: &[S], label: &str) -> Option<usize> {
    let label = label.to_lowercase();
    pages
        .iter()
        .position(|page| page.as_ref().to_lowercase().contains(&label))
}

/// Locate `label` in a document; `Ok(None)` when no page contains it.
pub fn locate_anchor(
    backend: &dyn DocumentBackend,
    document: &Document,
    label: &str,
) -> Result<Option<usize>, PdfError> {
    Ok(find_anchor_page(&backend.page_texts(document)?, label))
}
