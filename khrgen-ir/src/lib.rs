//! Entity model for the khrgen binding generator.
//!
//! This crate provides the unified type definitions used across the khrgen
//! pipeline. These types serve as the single source of truth for the parsed
//! registry content.
//!
//! # Architecture
//!
//! ```text
//! gl.xml (XML) → khrgen-registry (parsing) → khrgen-ir (entities) → codegen
//! ```
//!
//! The entity types are designed to be:
//! - Plain data (no back-references; cross-reference maps are built by the
//!   resolve phase and passed alongside)
//! - Explicitly discriminated (enum kinds and type markers are tagged
//!   variants, never inferred from attribute presence)
//! - Deterministically ordered (sorting keys are part of the model)

mod registry;
mod types;

pub use registry::{ApiRegistry, Command, Extension, Feature, Group, Parameter, TypeDef};
pub use types::{Enum, EnumKind, EnumValue, TypeDesc};
