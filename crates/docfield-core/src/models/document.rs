//! Registered source documents.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A document registered for extraction.
///
/// Immutable once registered; every component reads it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    /// File name used by rules to refer to this document.
    pub filename: String,
    /// Resolved file-system path.
    pub path: PathBuf,
}

impl Document {
    /// Create a document from a filename and its resolved path.
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
        }
    }

    /// Create a document from a path, taking the filename from its last component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { filename, path }
    }

    /// Path of the document on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_takes_file_name() {
        let doc = Document::from_path("/docs/nested/a.pdf");
        assert_eq!(doc.filename, "a.pdf");
        assert_eq!(doc.path(), Path::new("/docs/nested/a.pdf"));
    }
}
