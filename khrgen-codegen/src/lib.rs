//! Resolution pipeline and shared code generation utilities for khrgen.
//!
//! This crate turns a parsed [`khrgen_ir::ApiRegistry`] into a fully
//! cross-referenced entity graph and provides the language-agnostic building
//! blocks consumed by artifact renderers (e.g. `khrgen-codegen-cpp`).
//!
//! # Module Organization
//!
//! - [`pipeline`] - Phase orchestration (patch → resolve → verify), context,
//!   diagnostics, plugin hooks
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)
//! - [`resolved`] - The immutable cross-reference maps and support predicate
//! - [`incore`] - The extension fold-in table data asset

pub mod builder;
pub mod incore;
pub mod pipeline;
pub mod resolved;

mod generation;

pub use builder::{CodeBuilder, Indent};
pub use generation::PreviewFile;
pub use incore::IncoreTable;
pub use resolved::{ResolvedApi, SupportInfo};
