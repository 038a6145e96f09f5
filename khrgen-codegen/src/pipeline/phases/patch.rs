//! Patch phase - merges the patch registry into the base entity set.

use eyre::Result;
use khrgen_registry::apply_patch;

use crate::pipeline::{GenerationContext, Phase};

/// Phase that overlays the optional patch registry onto the base set.
///
/// The merge is additive: entities absent from the base set are inserted,
/// present ones receive field corrections, nothing is removed. Without a
/// patch document this phase is a no-op.
pub struct PatchPhase;

impl Phase for PatchPhase {
    fn name(&self) -> &'static str {
        "patch"
    }

    fn description(&self) -> &'static str {
        "Merge the patch registry into the base entity set"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        if let Some(patch) = ctx.patch.take() {
            apply_patch(&mut ctx.registry, &patch);
            ctx.add_info(
                self.name(),
                format!(
                    "patched: {} enums, {} commands, {} groups, {} types",
                    patch.enums.len(),
                    patch.commands.len(),
                    patch.groups.len(),
                    patch.types.len()
                ),
            );
        }
        Ok(())
    }
}
