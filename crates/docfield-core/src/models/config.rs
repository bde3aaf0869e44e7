//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the docfield pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Table matching configuration.
    pub matching: MatchingConfig,

    /// Table finder configuration.
    pub tables: TableConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Rule resolution configuration.
    pub resolution: ResolutionConfig,
}

/// Anchor-based table matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Number of lines after the anchor used as context text.
    pub context_lines: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self { context_lines: 10 }
    }
}

/// Table finder settings passed to pdfplumber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// How table boundaries are found.
    pub strategy: TableStrategy,

    /// Distance within which parallel ruling lines are snapped together.
    pub snap_tolerance: f64,

    /// Gap within which collinear line segments are joined.
    pub join_tolerance: f64,

    /// Distance within which characters are grouped into cell text.
    pub text_tolerance: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            strategy: TableStrategy::default(),
            snap_tolerance: 3.0,
            join_tolerance: 3.0,
            text_tolerance: 3.0,
        }
    }
}

/// Table boundary detection strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStrategy {
    /// Ruling lines and rectangle edges.
    #[default]
    Lattice,
    /// Text alignment, for tables drawn without borders.
    Stream,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Persist the full document text when a pattern rule matches.
    pub save_text: bool,

    /// Directory for `<filename>_output.txt` artifacts.
    pub text_dir: PathBuf,

    /// Result table written after the batch.
    pub result_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_text: false,
            text_dir: PathBuf::from("."),
            result_file: PathBuf::from("extracted_output.csv"),
        }
    }
}

/// Rule resolution configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// How rules combining a table lookup and a pattern are resolved.
    pub policy: ResolutionPolicy,
}

/// Resolution policy for rules that carry both a table lookup and a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// The pattern wins and is searched across the whole document text.
    #[default]
    AnchorFallback,
    /// The table cells are resolved first and the pattern is applied to them.
    CellPattern,
}

impl ExtractConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Path of the side artifact for a document's extracted text.
    pub fn text_artifact_path(&self, filename: &str) -> PathBuf {
        self.output.text_dir.join(format!("{}_output.txt", filename))
    }
}
