//! Generation context passed through pipeline phases.

use khrgen_ir::ApiRegistry;

use super::diagnostic::{Diagnostic, Severity};
use crate::incore::IncoreTable;
use crate::resolved::ResolvedApi;

/// Context passed through all pipeline phases.
///
/// Carries the parsed registry, the optional patch set, and the state
/// accumulated by each phase: the resolved cross-reference maps and the
/// collected diagnostics.
#[derive(Debug)]
pub struct GenerationContext {
    /// The parsed base registry (mutated only by the patch phase).
    pub registry: ApiRegistry,
    /// The parsed patch registry, if a patch document was given.
    pub patch: Option<ApiRegistry>,
    /// The extension fold-in table.
    pub incore: IncoreTable,
    /// The resolved cross-reference maps (populated by ResolvePhase).
    pub resolved: Option<ResolvedApi>,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    /// Create a new generation context from a parsed registry.
    pub fn new(registry: ApiRegistry) -> Self {
        Self {
            registry,
            patch: None,
            incore: IncoreTable::default(),
            resolved: None,
            diagnostics: Vec::new(),
        }
    }

    /// Attach a parsed patch registry.
    pub fn with_patch(mut self, patch: Option<ApiRegistry>) -> Self {
        self.patch = patch;
        self
    }

    /// Attach an extension fold-in table.
    pub fn with_incore(mut self, incore: IncoreTable) -> Self {
        self.incore = incore;
        self
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Count the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    /// Add an error diagnostic.
    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    /// Add a warning diagnostic.
    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Add an info diagnostic.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// The resolved cross-reference maps.
    ///
    /// # Panics
    ///
    /// Panics if resolution has not run (i.e., ResolvePhase hasn't run).
    pub fn resolved(&self) -> &ResolvedApi {
        self.resolved
            .as_ref()
            .expect("resolution not set - did ResolvePhase run?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_registry() -> ApiRegistry {
        ApiRegistry::new("gl")
    }

    #[test]
    fn test_context_creation() {
        let ctx = GenerationContext::new(make_test_registry());

        assert!(ctx.patch.is_none());
        assert!(ctx.resolved.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = GenerationContext::new(make_test_registry());

        ctx.add_error("resolve", "test error");
        ctx.add_warning("verify", "test warning");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_context_no_errors() {
        let mut ctx = GenerationContext::new(make_test_registry());

        ctx.add_warning("verify", "just a warning");
        ctx.add_info("resolve", "just info");

        assert!(!ctx.has_errors());
        assert!(ctx.has_warnings());
    }

    #[test]
    #[should_panic(expected = "did ResolvePhase run")]
    fn test_resolved_panics_before_resolution() {
        let ctx = GenerationContext::new(make_test_registry());
        let _ = ctx.resolved();
    }
}
