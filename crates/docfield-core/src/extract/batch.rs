//! Running a whole rule set against the registered documents.

use super::resolver::RuleResolver;
use crate::diagnostics::{Diagnostics, Scope};
use crate::error::RuleSetError;
use crate::models::{ExtractConfig, ExtractionResult, ExtractionRule};
use crate::pdf::DocumentBackend;
use crate::registry::DocumentRegistry;
use crate::rules::RuleSet;

/// Progress of a batch, reported around each rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEvent<'r> {
    /// The rule is about to be resolved.
    Started(&'r ExtractionRule),
    /// The rule has been resolved, failed, or was skipped.
    Finished(&'r ExtractionRule),
}

/// Resolves every rule of a rule set, one at a time, in order.
pub struct BatchDriver<'a> {
    resolver: RuleResolver<'a>,
}

impl<'a> BatchDriver<'a> {
    pub fn new(backend: &'a dyn DocumentBackend, config: &'a ExtractConfig) -> Self {
        Self {
            resolver: RuleResolver::new(backend, config),
        }
    }

    /// Run all rules; one result per rule whose document is registered.
    ///
    /// Fails only when the rule set lacks a required column, before any
    /// rule runs. Rules naming an unregistered file are skipped without a
    /// result; every other failure yields a result without a value.
    pub fn run(
        &self,
        rules: &RuleSet,
        registry: &DocumentRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<ExtractionResult>, RuleSetError> {
        self.run_with_progress(rules, registry, diagnostics, |_| {})
    }

    /// Like [`BatchDriver::run`], reporting each rule's start and finish.
    pub fn run_with_progress(
        &self,
        rules: &RuleSet,
        registry: &DocumentRegistry,
        diagnostics: &mut Diagnostics,
        mut on_event: impl FnMut(RuleEvent<'_>),
    ) -> Result<Vec<ExtractionResult>, RuleSetError> {
        if let Err(e) = rules.validate_columns() {
            diagnostics.error(Scope::none(), e.to_string());
            return Err(e);
        }

        let mut results = Vec::with_capacity(rules.len());
        for rule in rules.rules() {
            on_event(RuleEvent::Started(rule));

            match registry.get(&rule.file_reference) {
                Some(document) => {
                    let outcome = self
                        .resolver
                        .resolve_outcome(rule, document, diagnostics)
                        .map_err(|e| e.to_string());
                    results.push(ExtractionResult::from_outcome(
                        rule.field_name.clone(),
                        document.path.clone(),
                        outcome,
                    ));
                }
                None => diagnostics.warn(
                    Scope::none(),
                    format!(
                        "File '{}' not found in provided directory.",
                        rule.file_reference
                    ),
                ),
            }

            on_event(RuleEvent::Finished(rule));
        }

        diagnostics.info(
            Scope::none(),
            format!(
                "Resolved {} of {} rules",
                results.iter().filter(|r| r.is_resolved()).count(),
                rules.len()
            ),
        );
        Ok(results)
    }
}
