//! Row/column specifications and cell selection.

use std::fmt;

use super::Table;
use crate::diagnostics::{Diagnostics, Scope};
use crate::error::ExtractionError;

/// Parsed row or column specification as 0-based indices.
///
/// Indices are signed: a `0` in the specification becomes `-1`, which is
/// always out of range. Values beyond `i64` saturate and stay out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSpec {
    indices: Vec<i64>,
}

impl CellSpec {
    /// Parse `"2"`, `"2.0"` or `"1, 3"` (1-based) into 0-based indices.
    ///
    /// A single value may be float-formatted and is truncated; list items
    /// must be integers.
    pub fn parse(spec: &str) -> Result<Self, ExtractionError> {
        let invalid = || ExtractionError::InvalidCoordinate(spec.to_string());

        let indices = if spec.contains(',') {
            spec.split(',')
                .map(|item| {
                    item.trim()
                        .parse::<i64>()
                        .map(|n| n.saturating_sub(1))
                        .map_err(|_| invalid())
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let value: f64 = spec.trim().parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            vec![(value.trunc() as i64).saturating_sub(1)]
        };

        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for CellSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let one_based: Vec<String> = self
            .indices
            .iter()
            .map(|i| i.saturating_add(1).to_string())
            .collect();
        write!(f, "{}", one_based.join(","))
    }
}

/// Read the cross product of `rows` x `cols` from `table`, row-major.
///
/// Out-of-range positions and absent cells yield an empty string, so the
/// result always has `rows.len() * cols.len()` entries.
pub fn resolve_cells(
    table: &Table,
    rows: &CellSpec,
    cols: &CellSpec,
    diagnostics: &mut Diagnostics,
    scope: Scope<'_>,
) -> Vec<String> {
    let mut values = Vec::with_capacity(rows.len() * cols.len());

    for &row in rows.indices() {
        for &col in cols.indices() {
            let cell = usize::try_from(row)
                .ok()
                .zip(usize::try_from(col).ok())
                .and_then(|(r, c)| table.cell(r, c));

            match cell {
                Some(value) => {
                    let value = value.unwrap_or_default();
                    diagnostics.debug(
                        scope,
                        format!(
                            "Extracted value at (row={}, col={}): {}",
                            row.saturating_add(1),
                            col.saturating_add(1),
                            value
                        ),
                    );
                    values.push(value.to_string());
                }
                None => {
                    diagnostics.warn(
                        scope,
                        format!(
                            "Invalid index at (row={}, col={}), skipping",
                            row.saturating_add(1),
                            col.saturating_add(1)
                        ),
                    );
                    values.push(String::new());
                }
            }
        }
    }

    values
}

/// Join resolved cell values into a rule's extracted value.
pub fn join_cells(values: &[String]) -> String {
    values.join("\n")
}
