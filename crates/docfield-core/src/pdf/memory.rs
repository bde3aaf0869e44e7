//! In-memory document backend.

use std::collections::HashMap;
use std::path::PathBuf;

use super::{DocumentBackend, PageTables, Result};
use crate::error::PdfError;
use crate::models::Document;
use crate::table::RawTable;

/// One page of an in-memory document.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    pub text: String,
    pub tables: Vec<RawTable>,
}

impl MemoryPage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tables: Vec::new(),
        }
    }

    /// Add a table given as raw rows.
    pub fn with_table(mut self, table: RawTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Add a table whose cells are all present.
    pub fn with_cells<R, C>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        self.with_table(
            rows.into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        )
    }
}

/// Backend serving documents held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    documents: HashMap<PathBuf, Vec<MemoryPage>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pages of a document.
    pub fn with_document(mut self, document: &Document, pages: Vec<MemoryPage>) -> Self {
        self.documents.insert(document.path.clone(), pages);
        self
    }

    fn pages(&self, document: &Document) -> Result<&[MemoryPage]> {
        self.documents
            .get(&document.path)
            .map(Vec::as_slice)
            .ok_or_else(|| PdfError::UnknownDocument(document.path.display().to_string()))
    }
}

impl DocumentBackend for MemoryBackend {
    fn page_texts(&self, document: &Document) -> Result<Vec<String>> {
        Ok(self.pages(document)?.iter().map(|p| p.text.clone()).collect())
    }

    fn tables(&self, document: &Document) -> Result<Vec<PageTables>> {
        Ok(self
            .pages(document)?
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.tables.is_empty())
            .map(|(page, p)| PageTables {
                page,
                tables: p.tables.clone(),
            })
            .collect())
    }
}
