//! Discovery of the documents rules can refer to.

use std::collections::BTreeMap;
use std::path::Path;

use glob::{Pattern, glob};
use tracing::{debug, info, warn};

use crate::error::{DocfieldError, Result};
use crate::models::Document;

/// Filename to document map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRegistry {
    documents: BTreeMap<String, Document>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursively collect the PDF files under `dir`.
    ///
    /// Files are keyed by filename only; when two files share a name, the
    /// one found later replaces the earlier one.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(DocfieldError::Config(format!(
                "not a directory: {}",
                dir.display()
            )));
        }

        let pattern = format!("{}/**/*", Pattern::escape(&dir.to_string_lossy()));
        let entries = glob(&pattern).map_err(|e| DocfieldError::Config(e.to_string()))?;

        let mut registry = Self::new();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            let is_pdf = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
            if is_pdf && path.is_file() {
                registry.insert(Document::from_path(path));
            }
        }

        if registry.is_empty() {
            warn!("No PDF files found in {}", dir.display());
        } else {
            info!("Found {} PDF files in {}", registry.len(), dir.display());
        }
        Ok(registry)
    }

    /// Build a registry from documents; later duplicates win.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut registry = Self::new();
        for document in documents {
            registry.insert(document);
        }
        registry
    }

    /// Register a document, replacing any with the same filename.
    pub fn insert(&mut self, document: Document) {
        if let Some(previous) = self.documents.insert(document.filename.clone(), document) {
            debug!(
                "Duplicate filename {}; replacing {}",
                previous.filename,
                previous.path.display()
            );
        }
    }

    pub fn get(&self, filename: &str) -> Option<&Document> {
        self.documents.get(filename)
    }

    /// Registered documents, ordered by filename.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_finds_nested_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("a.pdf"), b"").unwrap();
        fs::write(dir.path().join("nested/B.PDF"), b"").unwrap();
        fs::write(dir.path().join("nested/deeper/c.pdf"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let registry = DocumentRegistry::scan(dir.path()).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.get("c.pdf").unwrap().path,
            dir.path().join("nested/deeper/c.pdf")
        );
        assert!(registry.get("B.PDF").is_some());
        assert!(registry.get("notes.txt").is_none());
    }

    #[test]
    fn test_scan_rejects_missing_directory() {
        assert!(DocumentRegistry::scan(Path::new("/nonexistent/dir")).is_err());
    }

    #[test]
    fn test_later_duplicates_replace_earlier() {
        let registry = DocumentRegistry::from_documents([
            Document::new("a.pdf", "/first/a.pdf"),
            Document::new("a.pdf", "/second/a.pdf"),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a.pdf").unwrap().path, Path::new("/second/a.pdf"));
    }
}
