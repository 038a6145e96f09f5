//! XML API-registry parsing for the khrgen binding generator.
//!
//! This crate loads a Khronos-style registry document (`gl.xml`), maps its
//! sections into the typed entity records of [`khrgen_ir`], and merges an
//! optional same-schema patch document of hand-maintained corrections.
//!
//! Malformed documents are fatal; everything recoverable is left to the
//! pipeline's verify phase downstream.

mod error;
mod parse;
mod patch;
mod xml;

use std::path::Path;

pub use error::{Error, Result, SourceContext};
use khrgen_ir::ApiRegistry;
pub use patch::apply_patch;
pub use self::xml::{Element, Node, parse_document};

/// A loaded registry document.
///
/// Holds the source text (for error spans) and the parsed element tree;
/// entity parsing is performed per target API on demand.
#[derive(Debug)]
pub struct RegistryFile {
    ctx: SourceContext,
    root: Element,
}

impl RegistryFile {
    /// Load and parse a registry document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();
        Self::from_source(src, filename)
    }

    /// Parse a registry document from a string.
    pub fn from_source(src: impl Into<String>, filename: impl Into<String>) -> Result<Self> {
        let ctx = SourceContext::new(src, filename);
        let root = parse_document(&ctx)?;
        if root.name != "registry" {
            return Err(Box::new(Error::NotARegistry {
                src: ctx.named_source(),
                found: root.name,
            }));
        }
        Ok(Self { ctx, root })
    }

    /// Parse the base entity set for one target API, applying the
    /// completeness policy (unreferenced entities are dropped).
    pub fn parse_api(&self, api: &str) -> Result<ApiRegistry> {
        parse::parse_api(&self.root, api, &self.ctx)
    }

    /// Parse a patch entity set for one target API. Patch documents keep
    /// all entities; reachability is judged against the base set they are
    /// merged into, not against their own requirement lists.
    pub fn parse_patch(&self, api: &str) -> Result<ApiRegistry> {
        parse::parse_patch(&self.root, api, &self.ctx)
    }

    /// Source context of the loaded document.
    pub fn source(&self) -> &SourceContext {
        &self.ctx
    }
}
