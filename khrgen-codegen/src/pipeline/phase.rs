//! Pipeline phase trait.

use eyre::Result;

use super::GenerationContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    /// The phase name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
}

/// A phase in the resolution pipeline.
///
/// Phases are executed in order by the pipeline. Each phase can read and
/// modify the generation context, filling in resolved state or adding
/// diagnostics.
///
/// Built-in phases:
/// - `PatchPhase` - merges the patch registry into the base entity set
/// - `ResolvePhase` - builds the cross-reference maps
/// - `VerifyPhase` - reports referential integrity issues as diagnostics
///
/// Custom phases can be added to the pipeline for additional processing.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the generation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut GenerationContext) -> Result<()>;

    /// Get information about this phase.
    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
