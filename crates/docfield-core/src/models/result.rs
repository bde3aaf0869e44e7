//! Extraction output rows.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One output row: the value extracted for a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Field name copied from the rule.
    #[serde(rename = "Field Name")]
    pub field_name: String,

    /// Path of the document the value was extracted from.
    #[serde(rename = "File Extracted Path")]
    pub document_path: PathBuf,

    /// Extracted value, absent when the rule failed.
    #[serde(rename = "Value")]
    pub value: Option<String>,

    /// Why the rule produced no value.
    #[serde(skip)]
    pub failure: Option<String>,
}

impl ExtractionResult {
    /// Build a row from a rule resolution outcome.
    pub fn from_outcome(
        field_name: impl Into<String>,
        document_path: impl Into<PathBuf>,
        outcome: Result<String, String>,
    ) -> Self {
        let (value, failure) = match outcome {
            Ok(value) => (Some(value), None),
            Err(reason) => (None, Some(reason)),
        };
        Self {
            field_name: field_name.into(),
            document_path: document_path.into(),
            value,
            failure,
        }
    }

    /// Whether a value was extracted.
    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}
