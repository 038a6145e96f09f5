//! Output management shared by artifact renderers.

use std::path::{Path, PathBuf};

use khrgen_core::{FileRules, GeneratedFile, Overwrite};

/// A rendered artifact, not yet written to disk.
///
/// Renderers produce these so content can be asserted on in tests without
/// touching the filesystem; writing is a separate step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Path relative to the output root, e.g. "include/glapi/gl43core/enum.h".
    pub path: String,
    /// Complete file content.
    pub content: String,
}

impl PreviewFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

impl GeneratedFile for PreviewFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn rules(&self) -> FileRules {
        // identical content is left untouched so downstream builds see
        // stable mtimes
        FileRules {
            overwrite: Overwrite::IfChanged,
        }
    }

    fn render(&self) -> String {
        self.content.clone()
    }
}
