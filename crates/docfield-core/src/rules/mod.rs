//! Rule sets: the tabular description of what to extract.

mod reader;

pub use reader::{read_csv, read_workbook};

use std::path::Path;

use crate::error::RuleSetError;
use crate::models::ExtractionRule;

pub const FILE_PATH: &str = "File Path";
pub const FIELD_NAME: &str = "Field Name";
pub const TEXT_EXTRACTION: &str = "Text Extraction";
pub const TABLE_NO: &str = "Table No";
pub const ROW_NO: &str = "Row No";
pub const COLUMN_NO: &str = "Column No";
pub const IDENTIFIER: &str = "Identifier";

/// Columns every rule set must have. `Identifier` is optional.
pub const REQUIRED_COLUMNS: [&str; 6] =
    [FILE_PATH, FIELD_NAME, TEXT_EXTRACTION, TABLE_NO, ROW_NO, COLUMN_NO];

/// An ordered set of extraction rules and the header they were read with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    columns: Vec<String>,
    rules: Vec<ExtractionRule>,
}

impl RuleSet {
    /// Read a rule set from a CSV file or a spreadsheet workbook.
    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let (headers, rows) = match extension.as_str() {
            "csv" => read_csv(path)?,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
            _ => return Err(RuleSetError::UnsupportedFormat(path.display().to_string())),
        };
        Ok(Self::from_table(headers, rows))
    }

    /// Build rules from a header row and data rows.
    ///
    /// Missing columns are not an error here; they are reported by
    /// [`RuleSet::validate_columns`] before a batch runs.
    pub fn from_table(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let columns: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let position = |name: &str| columns.iter().position(|c| c == name);

        let file_path = position(FILE_PATH);
        let field_name = position(FIELD_NAME);
        let text_extraction = position(TEXT_EXTRACTION);
        let table_no = position(TABLE_NO);
        let row_no = position(ROW_NO);
        let column_no = position(COLUMN_NO);
        let identifier = position(IDENTIFIER);

        let rules = rows
            .iter()
            .map(|row| {
                let cell = |index: Option<usize>| {
                    index
                        .and_then(|i| row.get(i))
                        .and_then(|c| c.as_deref())
                        .filter(|c| !c.trim().is_empty())
                        .map(str::to_string)
                };
                let trimmed = |index: Option<usize>| cell(index).map(|c| c.trim().to_string());

                ExtractionRule {
                    field_name: cell(field_name).unwrap_or_default(),
                    file_reference: trimmed(file_path).unwrap_or_default(),
                    text_pattern: cell(text_extraction),
                    table_number: trimmed(table_no),
                    row_spec: trimmed(row_no),
                    col_spec: trimmed(column_no),
                    identifier: cell(identifier),
                }
            })
            .collect();

        Self { columns, rules }
    }

    /// Build a rule set from rules directly, with the standard header.
    pub fn from_rules(rules: Vec<ExtractionRule>) -> Self {
        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.push(IDENTIFIER.to_string());
        Self { columns, rules }
    }

    /// Fail on the first required column absent from the header.
    pub fn validate_columns(&self) -> Result<(), RuleSetError> {
        match REQUIRED_COLUMNS
            .iter()
            .find(|required| !self.columns.iter().any(|c| c == *required))
        {
            Some(missing) => Err(RuleSetError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
            .collect()
    }

    #[test]
    fn test_from_table_maps_columns_by_name() {
        let rules = RuleSet::from_table(
            headers(&[" Field Name", "File Path", "Text Extraction", "Table No", "Row No", "Column No", "Identifier"]),
            vec![
                row(&["Total", " a.pdf ", "", "1", "2", "3", ""]),
                row(&["Date", "a.pdf", r"\d{2}/\d{2}/\d{4}", "", "", "", "  "]),
            ],
        );

        assert!(rules.validate_columns().is_ok());
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules.rules()[0],
            ExtractionRule::new("Total", "a.pdf").with_table("1").with_cells("2", "3")
        );
        assert_eq!(
            rules.rules()[1],
            ExtractionRule::new("Date", "a.pdf").with_pattern(r"\d{2}/\d{2}/\d{4}")
        );
    }

    #[test]
    fn test_short_rows_leave_cells_absent() {
        let rules = RuleSet::from_table(
            headers(&["File Path", "Field Name", "Text Extraction", "Table No", "Row No", "Column No"]),
            vec![row(&["a.pdf", "Total"])],
        );
        assert_eq!(rules.rules()[0], ExtractionRule::new("Total", "a.pdf"));
    }

    #[test]
    fn test_validate_reports_missing_column() {
        let rules = RuleSet::from_table(
            headers(&["File Path", "Field Name", "Text Extraction", "Table No", "Row No"]),
            vec![],
        );
        match rules.validate_columns() {
            Err(RuleSetError::MissingColumn(column)) => assert_eq!(column, "Column No"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_from_rules_has_standard_header() {
        let rules = RuleSet::from_rules(vec![ExtractionRule::new("Total", "a.pdf")]);
        assert!(rules.validate_columns().is_ok());
        assert_eq!(rules.columns().last().map(String::as_str), Some(IDENTIFIER));
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        assert!(matches!(
            RuleSet::from_path(Path::new("rules.txt")),
            Err(RuleSetError::UnsupportedFormat(_))
        ));
    }
}
