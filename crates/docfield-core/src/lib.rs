//! Core library for rule-driven field extraction from PDF documents.
//!
//! This crate provides:
//! - Rule sets read from CSV files or spreadsheets
//! - Document discovery and a PDF text/table backend
//! - Table catalogs, heading-based table matching and cell selection
//! - Per-rule resolution and batch processing with structured diagnostics

pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;
pub mod registry;
pub mod rules;
pub mod table;

pub use diagnostics::{Diagnostic, Diagnostics, Scope, Severity};
pub use error::{DocfieldError, ExtractionError, PdfError, Result, RuleSetError};
pub use extract::{BatchDriver, RuleEvent, RuleResolver, locate_anchor, resolve_table_by_heading};
pub use models::{
    Document, ExtractConfig, ExtractionResult, ExtractionRule, ResolutionPolicy, TableConfig,
    TableStrategy,
};
pub use pdf::{DocumentBackend, MemoryBackend, MemoryPage, PageTables, PdfBackend, PdfExtractor};
pub use registry::DocumentRegistry;
pub use rules::RuleSet;
pub use table::{Table, TableCatalog};
