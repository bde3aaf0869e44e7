//! Document text and table backends.

mod extractor;
mod memory;

pub use extractor::{PdfBackend, PdfExtractor};
pub use memory::{MemoryBackend, MemoryPage};

use crate::error::PdfError;
use crate::models::Document;
use crate::table::RawTable;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Tables found on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTables {
    /// Page index (0-based).
    pub page: usize,
    /// Tables in the order they appear on the page.
    pub tables: Vec<RawTable>,
}

/// Source of page text and tables for registered documents.
///
/// Implementations acquire the underlying document inside each call and
/// release it before returning, whether or not the call succeeds.
pub trait DocumentBackend {
    /// Text of every page, in page order.
    fn page_texts(&self, document: &Document) -> Result<Vec<String>>;

    /// Text of the whole document.
    fn text(&self, document: &Document) -> Result<String> {
        Ok(self.page_texts(document)?.join("\n").trim().to_string())
    }

    /// Tables of every page that has any, in page order.
    fn tables(&self, document: &Document) -> Result<Vec<PageTables>>;
}
