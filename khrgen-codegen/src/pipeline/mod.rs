//! Resolution pipeline for the parsed registry.
//!
//! This module provides a [`Pipeline`] orchestrator that manages the stages
//! between parsing and emission. The pipeline provides:
//!
//! - Explicit phase boundaries (patch → resolve → verify)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Shared state via [`GenerationContext`]
//!
//! # Example
//!
//! ```ignore
//! use khrgen_codegen::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new();
//! let ctx = pipeline.run(registry, patch, incore)?;
//!
//! // Check for warnings
//! for diag in &ctx.diagnostics {
//!     if matches!(diag.severity, Severity::Warning) {
//!         eprintln!("warning: {}", diag.message);
//!     }
//! }
//!
//! // Use context with a renderer
//! let generator = Generator::from_context(&ctx);
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::SnapshotPlugin;
