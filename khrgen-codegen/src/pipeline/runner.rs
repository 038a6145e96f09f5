//! Pipeline orchestrator.

use eyre::Result;
use khrgen_ir::ApiRegistry;

use super::{
    GenerationContext, Phase, Plugin,
    phases::{PatchPhase, ResolvePhase, VerifyPhase},
};
use crate::incore::IncoreTable;

/// The resolution pipeline orchestrator.
///
/// The pipeline manages the execution of phases and plugin hooks. It runs
/// built-in phases (patch, resolve, verify) followed by any user phases,
/// calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(MyPlugin::new())
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(registry, None, IncoreTable::default())?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on a parsed registry.
    ///
    /// Executes all phases in order:
    /// 1. PatchPhase - merges the patch registry, if any
    /// 2. ResolvePhase - builds the cross-reference maps
    /// 3. VerifyPhase - reports referential integrity issues
    /// 4. User phases (if any)
    ///
    /// Plugin hooks are called before and after each phase.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(
        &self,
        registry: ApiRegistry,
        patch: Option<ApiRegistry>,
        incore: IncoreTable,
    ) -> Result<GenerationContext> {
        let mut ctx = GenerationContext::new(registry)
            .with_patch(patch)
            .with_incore(incore);

        // Built-in phases in execution order
        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(PatchPhase),
            Box::new(ResolvePhase),
            Box::new(VerifyPhase),
        ];

        // Run built-in phases, then user phases
        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut GenerationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
