//! Field extraction rules.

use serde::{Deserialize, Serialize};

use super::config::ResolutionPolicy;
use crate::error::ExtractionError;

/// One row of the rule set.
///
/// Cells are kept as written; numeric cells are parsed when the rule is
/// resolved so a bad value only fails its own row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRule {
    /// Output key for the extracted value.
    pub field_name: String,
    /// Filename of the document the rule applies to.
    pub file_reference: String,
    /// Pattern searched across the whole document text.
    pub text_pattern: Option<String>,
    /// 1-based table number in the flattened catalog.
    pub table_number: Option<String>,
    /// Row specification: `"2"` or `"1,3"`.
    pub row_spec: Option<String>,
    /// Column specification: `"2"` or `"1,3"`.
    pub col_spec: Option<String>,
    /// Anchor label used to disambiguate tables.
    pub identifier: Option<String>,
}

/// The extraction strategy a rule resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStrategy<'a> {
    /// Look the value up in a table.
    Table {
        table_number: Option<&'a str>,
        identifier: Option<&'a str>,
        rows: &'a str,
        cols: &'a str,
        /// Pattern applied to the joined cell value (cell-pattern policy only).
        cell_pattern: Option<&'a str>,
    },
    /// Search the whole document text.
    Pattern(&'a str),
    /// Neither shape is complete.
    Invalid,
}

impl ExtractionRule {
    /// Create a rule for a field in a document.
    pub fn new(field_name: impl Into<String>, file_reference: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            file_reference: file_reference.into(),
            ..Self::default()
        }
    }

    /// Set the text pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.text_pattern = Some(pattern.into());
        self
    }

    /// Set the table number.
    pub fn with_table(mut self, table_number: impl Into<String>) -> Self {
        self.table_number = Some(table_number.into());
        self
    }

    /// Set the row and column specifications.
    pub fn with_cells(mut self, rows: impl Into<String>, cols: impl Into<String>) -> Self {
        self.row_spec = Some(rows.into());
        self.col_spec = Some(cols.into());
        self
    }

    /// Set the anchor identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Decide which strategy this rule uses under the given policy.
    pub fn strategy(&self, policy: ResolutionPolicy) -> RuleStrategy<'_> {
        let pattern = self.text_pattern.as_deref();
        let table_number = self.table_number.as_deref();
        let identifier = self.identifier.as_deref();
        let has_table = table_number.is_some() || identifier.is_some();

        if let (true, Some(rows), Some(cols)) =
            (has_table, self.row_spec.as_deref(), self.col_spec.as_deref())
        {
            match (policy, pattern) {
                (ResolutionPolicy::AnchorFallback, Some(_)) => {}
                (ResolutionPolicy::AnchorFallback, None) => {
                    return RuleStrategy::Table {
                        table_number,
                        identifier,
                        rows,
                        cols,
                        cell_pattern: None,
                    };
                }
                (ResolutionPolicy::CellPattern, cell_pattern) => {
                    return RuleStrategy::Table {
                        table_number,
                        identifier,
                        rows,
                        cols,
                        cell_pattern,
                    };
                }
            }
        }

        match pattern {
            Some(pattern) => RuleStrategy::Pattern(pattern),
            None => RuleStrategy::Invalid,
        }
    }

    /// Parse the table number, accepting spreadsheet floats like `"2.0"`.
    pub fn table_index(&self) -> Result<Option<usize>, ExtractionError> {
        self.table_number.as_deref().map(parse_table_number).transpose()
    }
}

fn parse_table_number(raw: &str) -> Result<usize, ExtractionError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ExtractionError::InvalidTableNumber(raw.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ExtractionError::InvalidTableNumber(raw.to_string()));
    }
    Ok(value.trunc() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_strategy() {
        let rule = ExtractionRule::new("Total", "a.pdf")
            .with_table("1")
            .with_cells("2", "3");

        assert_eq!(
            rule.strategy(ResolutionPolicy::AnchorFallback),
            RuleStrategy::Table {
                table_number: Some("1"),
                identifier: None,
                rows: "2",
                cols: "3",
                cell_pattern: None,
            }
        );
    }

    #[test]
    fn test_identifier_alone_selects_table_strategy() {
        let rule = ExtractionRule::new("Total", "a.pdf")
            .with_identifier("Summary")
            .with_cells("1", "1");

        assert!(matches!(
            rule.strategy(ResolutionPolicy::AnchorFallback),
            RuleStrategy::Table { identifier: Some("Summary"), .. }
        ));
    }

    #[test]
    fn test_pattern_wins_over_table_by_default() {
        let rule = ExtractionRule::new("Date", "a.pdf")
            .with_table("1")
            .with_cells("1", "1")
            .with_pattern(r"\d+");

        assert_eq!(
            rule.strategy(ResolutionPolicy::AnchorFallback),
            RuleStrategy::Pattern(r"\d+")
        );
    }

    #[test]
    fn test_cell_pattern_policy_keeps_table() {
        let rule = ExtractionRule::new("Date", "a.pdf")
            .with_table("1")
            .with_cells("1", "1")
            .with_pattern(r"\d+");

        assert!(matches!(
            rule.strategy(ResolutionPolicy::CellPattern),
            RuleStrategy::Table { cell_pattern: Some(r"\d+"), .. }
        ));
    }

    #[test]
    fn test_incomplete_table_without_pattern_is_invalid() {
        let rule = ExtractionRule::new("Total", "a.pdf").with_table("1");
        assert_eq!(
            rule.strategy(ResolutionPolicy::AnchorFallback),
            RuleStrategy::Invalid
        );
    }

    #[test]
    fn test_table_index_accepts_float_cells() {
        let rule = ExtractionRule::new("Total", "a.pdf").with_table("2.0");
        assert_eq!(rule.table_index().unwrap(), Some(2));

        let rule = ExtractionRule::new("Total", "a.pdf").with_table("two");
        assert!(matches!(
            rule.table_index(),
            Err(ExtractionError::InvalidTableNumber(_))
        ));
    }
}
