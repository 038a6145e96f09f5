//! C++ binding artifact renderers for khrgen.
//!
//! This crate projects a resolved registry through pure renderers into the
//! `glapi` C++ binding library source tree: one header subtree per
//! (feature version × profile) combination plus the version-independent
//! binding objects and metadata lookup tables.
//!
//! Rendering never touches the filesystem; [`Generator::preview`] returns
//! the complete artifact list and [`Generator::generate`] writes it.

mod files;
mod generator;
mod subtree;

pub use generator::{GenerateSummary, Generator};
pub use subtree::{Profile, Subtree};
