//! PDF text extraction using lopdf and pdf-extract, tables using pdfplumber.

use std::path::Path;

use lopdf::Document as LoDocument;
use pdfplumber::{Pdf, Strategy, TableSettings};
use tracing::{debug, trace};

use super::{DocumentBackend, PageTables, Result};
use crate::error::PdfError;
use crate::models::Document;
use crate::models::config::{TableConfig, TableStrategy};

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<LoDocument>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Read and load a PDF file.
    pub fn open(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| PdfError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut extractor = Self::new();
        extractor.load(&data)?;
        Ok(extractor)
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = LoDocument::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Get the number of pages in the PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract text from the entire PDF.
    pub fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Extract text from a specific page (1-indexed) using lopdf.
    pub fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Extract the text of every page, in page order.
    ///
    /// pdf-extract is tried first; lopdf is used when it fails or
    /// disagrees on the page count.
    pub fn extract_page_texts(&self) -> Result<Vec<String>> {
        let page_count = self.page_count();

        match pdf_extract::extract_text_from_mem_by_pages(&self.raw_data) {
            Ok(pages) if pages.len() == page_count as usize => return Ok(pages),
            Ok(pages) => debug!(
                "pdf-extract returned {} pages, expected {}; falling back to lopdf",
                pages.len(),
                page_count
            ),
            Err(e) => debug!("pdf-extract failed ({}); falling back to lopdf", e),
        }

        (1..=page_count).map(|page| self.extract_page_text(page)).collect()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Document backend reading PDF files from disk.
///
/// Each call opens the file, extracts what it needs and drops the parsed
/// document before returning. Text comes from [`PdfExtractor`]; tables are
/// found by pdfplumber on each page's ruling lines or text alignment.
#[derive(Debug, Clone, Default)]
pub struct PdfBackend {
    tables: TableConfig,
}

impl PdfBackend {
    pub fn new(tables: TableConfig) -> Self {
        Self { tables }
    }

    fn open_tables(&self, path: &Path) -> Result<Pdf> {
        match Pdf::open_file(path, None) {
            Err(pdfplumber::PdfError::PasswordRequired) => {
                debug!("Opening encrypted PDF with empty password");
                Pdf::open_file_with_password(path, b"", None)
                    .map_err(|e| plumber_error(path, e))
            }
            opened => opened.map_err(|e| plumber_error(path, e)),
        }
    }
}

/// pdfplumber settings for a table configuration.
fn table_settings(config: &TableConfig) -> TableSettings {
    let strategy = match config.strategy {
        TableStrategy::Lattice => Strategy::Lattice,
        TableStrategy::Stream => Strategy::Stream,
    };

    TableSettings {
        strategy,
        snap_tolerance: config.snap_tolerance,
        snap_x_tolerance: config.snap_tolerance,
        snap_y_tolerance: config.snap_tolerance,
        join_tolerance: config.join_tolerance,
        join_x_tolerance: config.join_tolerance,
        join_y_tolerance: config.join_tolerance,
        text_tolerance: config.text_tolerance,
        text_x_tolerance: config.text_tolerance,
        text_y_tolerance: config.text_tolerance,
        ..TableSettings::default()
    }
}

fn plumber_error(path: &Path, error: pdfplumber::PdfError) -> PdfError {
    match error {
        pdfplumber::PdfError::IoError(reason) => PdfError::Read {
            path: path.display().to_string(),
            reason,
        },
        pdfplumber::PdfError::PasswordRequired | pdfplumber::PdfError::InvalidPassword => {
            PdfError::Encrypted
        }
        other => PdfError::Parse(other.to_string()),
    }
}

impl DocumentBackend for PdfBackend {
    fn page_texts(&self, document: &Document) -> Result<Vec<String>> {
        PdfExtractor::open(document.path())?.extract_page_texts()
    }

    fn text(&self, document: &Document) -> Result<String> {
        let extractor = PdfExtractor::open(document.path())?;
        match extractor.extract_text() {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                debug!("Full-text extraction failed ({}); joining page texts", e);
                Ok(extractor.extract_page_texts()?.join("\n").trim().to_string())
            }
        }
    }

    fn tables(&self, document: &Document) -> Result<Vec<PageTables>> {
        let pdf = self.open_tables(document.path())?;
        let settings = table_settings(&self.tables);

        let mut found = Vec::new();
        for page in 0..pdf.page_count() {
            let tables = pdf
                .page(page)
                .map_err(|e| PdfError::Parse(format!("page {}: {}", page + 1, e)))?
                .extract_tables(&settings);
            if !tables.is_empty() {
                found.push(PageTables { page, tables });
            }
        }

        trace!(
            "Found tables on {} of {} pages in {}",
            found.len(),
            pdf.page_count(),
            document.path.display()
        );
        Ok(found)
    }
}
