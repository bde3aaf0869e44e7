//! Tables extracted from documents and the components that select them.

mod catalog;
mod coordinates;
mod matcher;
pub mod similarity;

pub use catalog::TableCatalog;
pub use coordinates::{CellSpec, join_cells, resolve_cells};
pub use matcher::{best_match, context_text, flatten_table};

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Rows of optional cells as produced by a backend, before validation.
pub type RawTable = Vec<Vec<Option<String>>>;

/// A rectangular grid of cells; a cell is a string or absent.
///
/// Cells may hold line breaks when the source cell wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Validate raw rows into a table.
    ///
    /// The grid must have at least one row and one cell. Rows shorter than
    /// the widest one are padded with absent cells.
    pub fn from_rows(mut rows: RawTable) -> Result<Self, ExtractionError> {
        if rows.is_empty() {
            return Err(ExtractionError::MalformedTable("table has no rows".into()));
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err(ExtractionError::MalformedTable("table has no columns".into()));
        }

        for row in &mut rows {
            row.resize(width, None);
        }

        Ok(Self { rows })
    }

    /// Build a table from string cells; empty strings stay as present cells.
    pub fn from_strings<R, C>(rows: R) -> Result<Self, ExtractionError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Cell at a 0-based position; `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<Option<&str>> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|cell| cell.as_deref())
    }

    /// Whether the first row holds `value` as a literal cell.
    pub fn first_row_contains(&self, value: &str) -> bool {
        self.rows
            .first()
            .is_some_and(|row| row.iter().any(|cell| cell.as_deref() == Some(value)))
    }

    /// Replace embedded line breaks in every cell with single spaces.
    pub fn with_flattened_cells(self) -> Self {
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map(|text| text.replace("\r\n", " ").replace(['\n', '\r'], " ")))
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = Table::from_rows(vec![
            vec![Some("c".to_string())],
            vec![Some("a".to_string()), Some("b".to_string())],
        ])
        .unwrap();

        assert_eq!(table.num_cols(), 2);
        assert_eq!(table.cell(0, 1), Some(None));
        assert_eq!(table.cell(1, 1), Some(Some("b")));
    }

    #[test]
    fn test_from_rows_rejects_empty_grid() {
        assert!(matches!(
            Table::from_rows(vec![]),
            Err(ExtractionError::MalformedTable(_))
        ));
        assert!(Table::from_rows(vec![vec![], vec![]]).is_err());
    }

    #[test]
    fn test_cells_keep_line_breaks() {
        let table = Table::from_strings([["Unit\nprice", "2"]]).unwrap();
        assert_eq!(table.cell(0, 0), Some(Some("Unit\nprice")));
    }

    #[test]
    fn test_cell_access() {
        let table = Table::from_rows(vec![
            vec![Some("Item".to_string()), None],
            vec![Some("Tea".to_string()), Some("3.50".to_string())],
        ])
        .unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_cols(), 2);
        assert_eq!(table.cell(1, 1), Some(Some("3.50")));
        assert_eq!(table.cell(0, 1), Some(None));
        assert_eq!(table.cell(2, 0), None);
        assert!(table.first_row_contains("Item"));
        assert!(!table.first_row_contains("Tea"));
    }

    #[test]
    fn test_with_flattened_cells() {
        let table = Table::from_strings([["Unit\nprice", "a\r\nb"]])
            .unwrap()
            .with_flattened_cells();
        assert_eq!(table.cell(0, 0), Some(Some("Unit price")));
        assert_eq!(table.cell(0, 1), Some(Some("a b")));
    }
}
