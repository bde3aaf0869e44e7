//! Resolving one extraction rule against one document.

use regex::Regex;

use super::heading::resolve_table_by_heading;
use crate::diagnostics::{Diagnostics, Scope};
use crate::error::ExtractionError;
use crate::models::{Document, ExtractConfig, ExtractionRule, RuleStrategy};
use crate::pdf::DocumentBackend;
use crate::table::{CellSpec, Table, TableCatalog, join_cells, resolve_cells};

/// Applies rules to documents through a document backend.
pub struct RuleResolver<'a> {
    backend: &'a dyn DocumentBackend,
    config: &'a ExtractConfig,
}

impl<'a> RuleResolver<'a> {
    pub fn new(backend: &'a dyn DocumentBackend, config: &'a ExtractConfig) -> Self {
        Self { backend, config }
    }

    /// Extracted value for `rule`, or `None` if it failed.
    ///
    /// Failures are recorded in `diagnostics` and never escape this call.
    pub fn resolve(
        &self,
        rule: &ExtractionRule,
        document: &Document,
        diagnostics: &mut Diagnostics,
    ) -> Option<String> {
        self.resolve_outcome(rule, document, diagnostics).ok()
    }

    /// Like [`RuleResolver::resolve`], keeping the failure reason.
    pub fn resolve_outcome(
        &self,
        rule: &ExtractionRule,
        document: &Document,
        diagnostics: &mut Diagnostics,
    ) -> Result<String, ExtractionError> {
        let scope = Scope::rule(&rule.field_name, document.path());
        let outcome = self.try_resolve(rule, document, diagnostics, scope);

        if let Err(e) = &outcome {
            match e {
                ExtractionError::AnchorNotFound(_)
                | ExtractionError::NoTablesOnPage(_)
                | ExtractionError::NoMatchingTable(_)
                | ExtractionError::TableNotFound { .. }
                | ExtractionError::NoPatternMatch(_)
                | ExtractionError::NoRule => diagnostics.warn(scope, e.to_string()),
                _ => diagnostics.error(
                    scope,
                    format!(
                        "Failed to process row '{}' from '{}': {}",
                        rule.field_name,
                        document.path.display(),
                        e
                    ),
                ),
            }
        }
        outcome
    }

    fn try_resolve(
        &self,
        rule: &ExtractionRule,
        document: &Document,
        diagnostics: &mut Diagnostics,
        scope: Scope<'_>,
    ) -> Result<String, ExtractionError> {
        match rule.strategy(self.config.resolution.policy) {
            RuleStrategy::Table {
                identifier,
                rows,
                cols,
                cell_pattern,
                ..
            } => {
                let rows = CellSpec::parse(rows)?;
                let cols = CellSpec::parse(cols)?;
                diagnostics.debug(scope, format!("Parsed rows [{}], columns [{}]", rows, cols));

                let table = self.resolve_table(rule, identifier, document, diagnostics, scope)?;
                let value = join_cells(&resolve_cells(&table, &rows, &cols, diagnostics, scope));

                match cell_pattern {
                    Some(pattern) => first_match(pattern, &value),
                    None => Ok(value),
                }
            }
            RuleStrategy::Pattern(pattern) => {
                let regex = compile(pattern)?;
                let text = self.backend.text(document)?;
                let found = regex
                    .find(&text)
                    .map(|m| m.as_str().to_string())
                    .ok_or_else(|| ExtractionError::NoPatternMatch(pattern.to_string()))?;

                if self.config.output.save_text {
                    self.save_text(document, &text, diagnostics, scope);
                }
                Ok(found)
            }
            RuleStrategy::Invalid => Err(ExtractionError::NoRule),
        }
    }

    /// Source table: identifier in a first row, then table number, then heading.
    fn resolve_table(
        &self,
        rule: &ExtractionRule,
        identifier: Option<&str>,
        document: &Document,
        diagnostics: &mut Diagnostics,
        scope: Scope<'_>,
    ) -> Result<Table, ExtractionError> {
        let catalog = TableCatalog::extract(self.backend, document, diagnostics)?;

        if let Some(identifier) = identifier {
            if let Some((number, table)) = catalog.find_by_first_row(identifier) {
                diagnostics.debug(
                    scope,
                    format!("Identifier '{}' found in header of table {}", identifier, number),
                );
                return Ok(table.clone());
            }
        }

        match rule.table_index() {
            Ok(Some(number)) => {
                if let Some(table) = catalog.get(number) {
                    return Ok(table.clone());
                }
            }
            Ok(None) => {}
            Err(e) if identifier.is_some() => diagnostics.warn(scope, e.to_string()),
            Err(e) => return Err(e),
        }

        match identifier {
            Some(identifier) => {
                diagnostics.debug(
                    scope,
                    format!("Falling back to heading lookup for '{}'", identifier),
                );
                resolve_table_by_heading(
                    self.backend,
                    document,
                    &catalog,
                    identifier,
                    self.config.matching.context_lines,
                    diagnostics,
                    scope,
                )
            }
            None => Err(ExtractionError::TableNotFound {
                table: rule.table_number.clone().unwrap_or_default(),
            }),
        }
    }

    fn save_text(
        &self,
        document: &Document,
        text: &str,
        diagnostics: &mut Diagnostics,
        scope: Scope<'_>,
    ) {
        let path = self.config.text_artifact_path(&document.filename);
        match std::fs::write(&path, text) {
            Ok(()) => diagnostics.debug(scope, format!("Saved text to {}", path.display())),
            Err(e) => diagnostics.warn(
                scope,
                format!("Failed to save text to {}: {}", path.display(), e),
            ),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, ExtractionError> {
    Regex::new(pattern).map_err(|e| ExtractionError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn first_match(pattern: &str, text: &str) -> Result<String, ExtractionError> {
    compile(pattern)?
        .find(text)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractionError::NoPatternMatch(pattern.to_string()))
}
