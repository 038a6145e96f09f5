//! Check command report data structures.

use std::path::PathBuf;

use super::generate::EntityCounts;
use super::output::{Output, Report};

/// Report data from registry verification.
#[derive(Debug)]
pub struct CheckReport {
    /// Path of the checked registry document.
    pub spec_path: PathBuf,

    /// Target API identifier.
    pub api: String,

    /// Entity counts after parsing.
    pub counts: EntityCounts,

    /// Fatal diagnostics.
    pub errors: Vec<String>,

    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,

    /// Informational diagnostics.
    pub infos: Vec<String>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.preformatted(&format!("error: {error}"));
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {info}"));
        }
        if !self.errors.is_empty() || !self.warnings.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if self.errors.is_empty() {
            out.preformatted(&format!("✓ {} resolves cleanly", self.spec_path.display()));
            out.newline();
            out.section(&format!("Entities ({} API)", self.api));
            out.key_value("  features", &self.counts.features.to_string());
            out.key_value("  extensions", &self.counts.extensions.to_string());
            out.key_value("  commands", &self.counts.commands.to_string());
            out.key_value("  enums", &self.counts.enums.to_string());
            out.key_value("  groups", &self.counts.groups.to_string());
        } else {
            out.preformatted(&format!(
                "✗ {} has {} error(s)",
                self.spec_path.display(),
                self.errors.len()
            ));
        }
    }
}
