//! Every table in a document, viewable per page or numbered document-wide.

use std::collections::BTreeMap;

use super::Table;
use crate::diagnostics::{Diagnostics, Scope};
use crate::error::PdfError;
use crate::models::Document;
use crate::pdf::DocumentBackend;

/// Tables of one document from a single extraction pass.
///
/// Built fresh for each rule; documents never change once registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCatalog {
    /// 0-based page index to that page's tables; pages without tables are absent.
    pages: BTreeMap<usize, Vec<Table>>,
}

impl TableCatalog {
    /// Extract all tables of a document.
    ///
    /// A table that is not a valid grid is skipped and reported; it does not
    /// fail the extraction.
    pub fn extract(
        backend: &dyn DocumentBackend,
        document: &Document,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, PdfError> {
        let mut pages: BTreeMap<usize, Vec<Table>> = BTreeMap::new();

        for page in backend.tables(document)? {
            for raw in page.tables {
                match Table::from_rows(raw) {
                    Ok(table) => pages.entry(page.page).or_default().push(table),
                    Err(e) => diagnostics.warn(
                        Scope::document(document.path()),
                        format!("Error parsing table on page {}: {}", page.page + 1, e),
                    ),
                }
            }
        }

        let catalog = Self { pages };
        diagnostics.debug(
            Scope::document(document.path()),
            format!(
                "Found {} tables on {} pages",
                catalog.len(),
                catalog.pages.len()
            ),
        );
        Ok(catalog)
    }

    /// Build a catalog from tables already grouped by page.
    pub fn from_pages(pages: impl IntoIterator<Item = (usize, Vec<Table>)>) -> Self {
        Self {
            pages: pages.into_iter().filter(|(_, t)| !t.is_empty()).collect(),
        }
    }

    /// Per-page view.
    pub fn pages(&self) -> &BTreeMap<usize, Vec<Table>> {
        &self.pages
    }

    /// Tables on a 0-based page, if it has any.
    pub fn page(&self, page: usize) -> Option<&[Table]> {
        self.pages.get(&page).map(Vec::as_slice)
    }

    /// Document-wide view: 1-based table number in first-seen order.
    pub fn numbered(&self) -> BTreeMap<usize, &Table> {
        self.iter().enumerate().map(|(i, t)| (i + 1, t)).collect()
    }

    /// Table by 1-based document-wide number.
    pub fn get(&self, number: usize) -> Option<&Table> {
        number.checked_sub(1).and_then(|index| self.iter().nth(index))
    }

    /// First table whose first row holds `identifier` as a literal cell.
    pub fn find_by_first_row(&self, identifier: &str) -> Option<(usize, &Table)> {
        self.iter()
            .enumerate()
            .find(|(_, table)| table.first_row_contains(identifier))
            .map(|(i, table)| (i + 1, table))
    }

    /// All tables in page order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.pages.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
