//! Pipeline snapshot plugin for visualization and debugging.
//!
//! Captures the pipeline state after each phase so intermediate entity sets
//! and diagnostics can be inspected on disk.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::Result;
use serde::Serialize;

use super::{Diagnostic, GenerationContext, Plugin};
use crate::resolved::ResolvedApi;

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// The entity set (reflects patch overlays once "patch" completed).
    pub registry: khrgen_ir::ApiRegistry,

    /// The cross-reference maps (available after "resolve").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedApi>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// Use this plugin with the `--visualize` flag to output intermediate
/// representations for debugging.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".khrgen/debug"));
/// let ctx = pipeline.run(registry, None, incore)?;
/// ```
pub struct SnapshotPlugin {
    /// Collected snapshots.
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Output directory for snapshots.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    /// Create a new snapshot plugin.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a new snapshot plugin that writes to a directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots.read().unwrap().clone()
    }

    /// Write all snapshots to the configured output directory.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for snapshot in self.snapshots.read().unwrap().iter() {
            let filename = format!("{}.json", snapshot.phase);
            let path = dir.join(&filename);
            let json = serde_json::to_string_pretty(snapshot)?;
            fs::write(&path, json)?;
        }

        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &GenerationContext) {
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            registry: ctx.registry.clone(),
            resolved: ctx.resolved.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots.write().unwrap().push(snapshot);
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        self.capture_snapshot(phase, ctx);

        // If output directory is configured, write immediately
        if let Some(ref dir) = self.output_dir {
            let filename = format!("{}.json", phase);
            let path = dir.join(&filename);

            if let Some(snapshot) = self.snapshots.read().unwrap().last() {
                fs::create_dir_all(dir)?;
                let json = serde_json::to_string_pretty(snapshot)?;
                fs::write(&path, json)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use khrgen_ir::ApiRegistry;

    use super::*;

    #[test]
    fn test_snapshot_captured_after_phase() {
        let plugin = SnapshotPlugin::new();
        let mut ctx = GenerationContext::new(ApiRegistry::new("gl"));

        plugin.on_after_phase("patch", &mut ctx).unwrap();

        let snapshots = plugin.snapshots();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].phase, "patch");
        assert!(snapshots[0].resolved.is_none());
    }

    #[test]
    fn test_write_to_dir() {
        let plugin = SnapshotPlugin::new();
        let mut ctx = GenerationContext::new(ApiRegistry::new("gl"));
        plugin.on_after_phase("resolve", &mut ctx).unwrap();

        let temp = tempfile::TempDir::new().unwrap();
        plugin.write_to_dir(temp.path()).unwrap();

        assert!(temp.path().join("resolve.json").exists());
    }
}
