//! Reading rule-set tables from CSV files and spreadsheets.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::RuleSetError;

type TableRows = (Vec<String>, Vec<Vec<Option<String>>>);

fn read_error(path: &Path, reason: impl ToString) -> RuleSetError {
    RuleSetError::Read {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Read a CSV file whose first record is the header.
pub fn read_csv(path: &Path) -> Result<TableRows, RuleSetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| read_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| read_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| read_error(path, e))?;
        rows.push(
            record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect(),
        );
    }

    debug!("Read {} rule rows from {}", rows.len(), path.display());
    Ok((headers, rows))
}

/// Read the first worksheet of a workbook; its first row is the header.
pub fn read_workbook(path: &Path) -> Result<TableRows, RuleSetError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(path, e))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(RuleSetError::Empty)?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| read_error(path, e))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = sheet_rows
        .next()
        .ok_or(RuleSetError::Empty)?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let rows: Vec<Vec<Option<String>>> = sheet_rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    debug!(
        "Read {} rule rows from sheet '{}' of {}",
        rows.len(),
        sheet,
        path.display()
    );
    Ok((headers, rows))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_csv_with_quoted_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.csv");
        std::fs::write(
            &path,
            "File Path,Field Name,Text Extraction,Table No,Row No,Column No\n\
             a.pdf,Total,,1,2,\"1,3\"\n\
             a.pdf,Date,\"\\d{2}/\\d{2}/\\d{4}\",,,\n",
        )
        .unwrap();

        let (headers, rows) = read_csv(&path).unwrap();

        assert_eq!(headers.len(), 6);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][5].as_deref(), Some("1,3"));
        assert_eq!(rows[0][2], None);
        assert_eq!(rows[1][2].as_deref(), Some(r"\d{2}/\d{2}/\d{4}"));
    }

    #[test]
    fn test_read_csv_missing_file() {
        assert!(matches!(
            read_csv(Path::new("/nonexistent/rules.csv")),
            Err(RuleSetError::Read { .. })
        ));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Float(2.0)).as_deref(), Some("2"));
        assert_eq!(cell_text(&Data::Int(3)).as_deref(), Some("3"));
        assert_eq!(cell_text(&Data::String("1,3".into())).as_deref(), Some("1,3"));
    }
}
