//! The extension fold-in table.
//!
//! Which extensions became part of core at which feature version is a
//! hand-maintained data table, not logic. It ships as a TOML asset versioned
//! alongside the registry so it can be updated without touching resolver
//! code; a path override replaces the embedded copy.

use std::collections::BTreeMap;
use std::path::Path;

use eyre::{Context, Result};
use khrgen_core::Version;
use serde::Deserialize;

/// The table shipped with this crate.
const BUILTIN: &str = include_str!("../data/extensions_incore.toml");

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    extensions: BTreeMap<String, Version>,
}

/// Extension name → feature version at which it folded into core.
///
/// Extensions absent from the table remain permanently "not yet core".
#[derive(Debug, Clone, Default)]
pub struct IncoreTable {
    entries: BTreeMap<String, Version>,
}

impl IncoreTable {
    /// The table embedded in this build.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN).wrap_err("embedded fold-in table is invalid")
    }

    /// Load a replacement table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read fold-in table '{}'", path.display()))?;
        Self::from_toml(&src)
            .wrap_err_with(|| format!("invalid fold-in table '{}'", path.display()))
    }

    /// Parse a table from TOML text.
    pub fn from_toml(src: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(src)?;
        Ok(Self {
            entries: file.extensions,
        })
    }

    /// The fold-in version for an extension, if it ever became core.
    pub fn get(&self, extension: &str) -> Option<Version> {
        self.entries.get(extension).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (extension, fold-in version) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Version)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let table = IncoreTable::builtin().unwrap();
        assert!(!table.is_empty());
        assert_eq!(
            table.get("GL_ARB_compute_shader"),
            Some(Version::new(4, 3))
        );
        assert_eq!(table.get("GL_EXT_never_core"), None);
    }

    #[test]
    fn test_from_toml() {
        let table = IncoreTable::from_toml(
            r#"
[extensions]
GL_ARB_example = "3.1"
"#,
        )
        .unwrap();
        assert_eq!(table.get("GL_ARB_example"), Some(Version::new(3, 1)));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let result = IncoreTable::from_toml(
            r#"
[extensions]
GL_ARB_broken = "three.two"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = IncoreTable::from_toml("").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
