//! Resolving a table from the heading printed above it.

use super::anchor::find_anchor_page;
use crate::diagnostics::{Diagnostics, Scope};
use crate::error::ExtractionError;
use crate::models::Document;
use crate::pdf::DocumentBackend;
use crate::table::{Table, TableCatalog, best_match, context_text};

/// Find the table belonging to the heading `label`.
///
/// A page holding a single table returns it as is. With several tables,
/// the one most similar to the `context_lines` lines after the heading
/// wins, with line breaks inside its cells replaced by spaces.
pub fn resolve_table_by_heading(
    backend: &dyn DocumentBackend,
    document: &Document,
    catalog: &TableCatalog,
    label: &str,
    context_lines: usize,
    diagnostics: &mut Diagnostics,
    scope: Scope<'_>,
) -> Result<Table, ExtractionError> {
    let pages = backend.page_texts(document)?;
    let page = find_anchor_page(&pages, label)
        .ok_or_else(|| ExtractionError::AnchorNotFound(label.to_string()))?;

    let candidates = catalog
        .page(page)
        .ok_or(ExtractionError::NoTablesOnPage(page + 1))?;

    if let [only] = candidates {
        diagnostics.debug(
            scope,
            format!("Heading '{}' on page {} has a single table", label, page + 1),
        );
        return Ok(only.clone());
    }

    let context = context_text(&pages[page], label, context_lines)
        .ok_or_else(|| ExtractionError::AnchorNotFound(label.to_string()))?;

    diagnostics.debug(
        scope,
        format!(
            "Scoring {} tables on page {} against heading '{}'",
            candidates.len(),
            page + 1,
            label
        ),
    );

    best_match(candidates, &context)
        .map(|table| table.clone().with_flattened_cells())
        .ok_or_else(|| ExtractionError::NoMatchingTable(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{MemoryBackend, MemoryPage};
    use pretty_assertions::assert_eq;

    fn setup(pages: Vec<MemoryPage>) -> (MemoryBackend, Document, TableCatalog) {
        let document = Document::new("a.pdf", "/docs/a.pdf");
        let backend = MemoryBackend::new().with_document(&document, pages);
        let catalog =
            TableCatalog::extract(&backend, &document, &mut Diagnostics::new()).unwrap();
        (backend, document, catalog)
    }

    fn resolve(
        backend: &MemoryBackend,
        document: &Document,
        catalog: &TableCatalog,
        label: &str,
    ) -> Result<Table, ExtractionError> {
        resolve_table_by_heading(
            backend,
            document,
            catalog,
            label,
            10,
            &mut Diagnostics::new(),
            Scope::none(),
        )
    }

    #[test]
    fn test_single_table_is_returned_without_scoring() {
        let (backend, document, catalog) = setup(vec![
            MemoryPage::new("cover"),
            MemoryPage::new("Fees\nnothing alike").with_cells([["zzz\nqqq"]]),
        ]);

        let table = resolve(&backend, &document, &catalog, "fees").unwrap();
        // Returned untouched: cell line breaks are kept.
        assert_eq!(table.cell(0, 0), Some(Some("zzz\nqqq")));
    }

    #[test]
    fn test_best_of_several_tables() {
        let page = MemoryPage::new("Fees\nService 10.00\nSupport 5.00\nOther text")
            .with_cells([["Name", "Age"], ["Ann", "31"]])
            .with_cells([["Service", "10.00"], ["Support\nplan", "5.00"]]);
        let (backend, document, catalog) = setup(vec![page]);

        let table = resolve(&backend, &document, &catalog, "Fees").unwrap();
        assert_eq!(table.cell(0, 0), Some(Some("Service")));
        assert_eq!(table.cell(1, 0), Some(Some("Support plan")));
    }

    #[test]
    fn test_lookup_failures() {
        let (backend, document, catalog) = setup(vec![
            MemoryPage::new("Fees\nnone here"),
            MemoryPage::new("Other").with_cells([["a", "b"]]),
        ]);

        assert!(matches!(
            resolve(&backend, &document, &catalog, "Missing"),
            Err(ExtractionError::AnchorNotFound(_))
        ));
        assert!(matches!(
            resolve(&backend, &document, &catalog, "Fees"),
            Err(ExtractionError::NoTablesOnPage(1))
        ));
    }

    #[test]
    fn test_no_candidate_scores() {
        let page = MemoryPage::new("Fees\nabc")
            .with_cells([["x"]])
            .with_cells([["y"]]);
        let (backend, document, catalog) = setup(vec![page]);

        assert!(matches!(
            resolve(&backend, &document, &catalog, "Fees"),
            Err(ExtractionError::NoMatchingTable(_))
        ));
    }
}
