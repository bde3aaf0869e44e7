//! Structured diagnostics passed explicitly through the pipeline.
//!
//! Every record is kept for inspection and forwarded to `tracing`, so
//! callers get console logging while tests can assert on the records.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Field name of the rule being resolved, if any.
    pub field_name: Option<String>,
    /// Document being processed, if any.
    pub document: Option<PathBuf>,
    pub message: String,
}

/// What a diagnostic refers to.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope<'a> {
    pub field_name: Option<&'a str>,
    pub document: Option<&'a Path>,
}

impl<'a> Scope<'a> {
    /// A record not tied to a rule or document.
    pub fn none() -> Self {
        Self::default()
    }

    /// A record about a document.
    pub fn document(document: &'a Path) -> Self {
        Self {
            field_name: None,
            document: Some(document),
        }
    }

    /// A record about one rule applied to one document.
    pub fn rule(field_name: &'a str, document: &'a Path) -> Self {
        Self {
            field_name: Some(field_name),
            document: Some(document),
        }
    }
}

/// Collector for diagnostic records.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and forward it to the tracing subscriber.
    pub fn record(&mut self, severity: Severity, scope: Scope<'_>, message: impl Into<String>) {
        let message = message.into();
        let field = scope.field_name.unwrap_or("-");
        let document = scope
            .document
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());

        match severity {
            Severity::Debug => debug!(field, document = %document, "{}", message),
            Severity::Info => info!(field, document = %document, "{}", message),
            Severity::Warning => warn!(field, document = %document, "{}", message),
            Severity::Error => error!(field, document = %document, "{}", message),
        }

        self.records.push(Diagnostic {
            severity,
            field_name: scope.field_name.map(str::to_string),
            document: scope.document.map(Path::to_path_buf),
            message,
        });
    }

    pub fn debug(&mut self, scope: Scope<'_>, message: impl Into<String>) {
        self.record(Severity::Debug, scope, message);
    }

    pub fn info(&mut self, scope: Scope<'_>, message: impl Into<String>) {
        self.record(Severity::Info, scope, message);
    }

    pub fn warn(&mut self, scope: Scope<'_>, message: impl Into<String>) {
        self.record(Severity::Warning, scope, message);
    }

    pub fn error(&mut self, scope: Scope<'_>, message: impl Into<String>) {
        self.record(Severity::Error, scope, message);
    }

    /// All records in emission order.
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Records at or above the given severity.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |r| r.severity >= severity)
    }

    /// Number of warnings and errors recorded.
    pub fn problem_count(&self) -> usize {
        self.at_least(Severity::Warning).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_scope() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.info(Scope::none(), "starting");
        diagnostics.warn(Scope::rule("Total", Path::new("/docs/a.pdf")), "no match");

        let warnings: Vec<_> = diagnostics.at_least(Severity::Warning).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field_name.as_deref(), Some("Total"));
        assert_eq!(warnings[0].document.as_deref(), Some(Path::new("/docs/a.pdf")));
        assert_eq!(diagnostics.problem_count(), 1);
        assert_eq!(diagnostics.records().len(), 2);
    }
}
