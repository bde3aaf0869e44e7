//! Error types for the docfield-core library.

use thiserror::Error;

/// Main error type for the docfield library.
#[derive(Error, Debug)]
pub enum DocfieldError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Rule-set loading or validation error.
    #[error("rule set error: {0}")]
    RuleSet(#[from] RuleSetError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the PDF file.
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The backend has no data for the document.
    #[error("unknown document: {0}")]
    UnknownDocument(String),
}

/// Errors related to reading and validating a rule set.
///
/// These are configuration errors: any of them aborts the whole batch.
#[derive(Error, Debug)]
pub enum RuleSetError {
    /// A required column is absent from the header.
    #[error("missing required column in rule set: {0}")]
    MissingColumn(String),

    /// The rule-set file could not be read.
    #[error("failed to read rule set {path}: {reason}")]
    Read { path: String, reason: String },

    /// The file extension is not a supported rule-set format.
    #[error("unsupported rule set format: {0}")]
    UnsupportedFormat(String),

    /// The workbook has no worksheet or no header row.
    #[error("rule set has no header row")]
    Empty,
}

/// Errors raised while resolving a single extraction rule.
///
/// None of these are fatal: the rule yields no value and the batch moves on.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No page contains the anchor label.
    #[error("anchor '{0}' not found in document")]
    AnchorNotFound(String),

    /// The anchor page has no tables.
    #[error("no tables found on page {0}")]
    NoTablesOnPage(usize),

    /// Several candidates, none of them similar to the anchor context.
    #[error("no table matches the context of anchor '{0}'")]
    NoMatchingTable(String),

    /// Neither identifier nor table number resolved a table.
    #[error("table {table} not found")]
    TableNotFound { table: String },

    /// The table number cell is not a number.
    #[error("invalid table number: {0}")]
    InvalidTableNumber(String),

    /// A row or column specification could not be parsed.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// The text pattern does not compile.
    #[error("invalid pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The text pattern matched nothing.
    #[error("no match for pattern {0}")]
    NoPatternMatch(String),

    /// The rule names neither a table strategy nor a text pattern.
    #[error("no valid extraction rule")]
    NoRule,

    /// A table from the backend is not a usable grid.
    #[error("malformed table: {0}")]
    MalformedTable(String),

    /// The document backend failed.
    #[error(transparent)]
    Document(#[from] PdfError),
}

/// Result type for the docfield library.
pub type Result<T> = std::result::Result<T, DocfieldError>;
