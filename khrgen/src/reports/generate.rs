//! Generate command report data structures.

use std::path::PathBuf;

use khrgen_ir::ApiRegistry;

use super::output::{Output, Report};

/// Entity counts from the parsing stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityCounts {
    pub features: usize,
    pub extensions: usize,
    pub commands: usize,
    pub enums: usize,
    pub groups: usize,
    pub types: usize,
}

impl EntityCounts {
    pub fn of(registry: &ApiRegistry) -> Self {
        Self {
            features: registry.features.len(),
            extensions: registry.extensions.len(),
            commands: registry.commands.len(),
            enums: registry.enums.len(),
            groups: registry.groups.len(),
            types: registry.types.len(),
        }
    }
}

/// Report data from binding generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Target API identifier.
    pub api: String,

    /// Registry revision from the side file.
    pub revision: u32,

    /// Entity counts after parsing.
    pub counts: EntityCounts,

    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,

    /// Generation result (files written, preview, or gate hit).
    pub result: GenerationResult,
}

/// Result of binding generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
    /// The output tree already carries the current registry revision.
    UpToDate { revision: u32 },
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Files written (new or changed).
    pub written: usize,
    /// Files left untouched (identical content).
    pub unchanged: usize,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        if !self.warnings.is_empty() {
            out.warning(&format!("{} pipeline warning(s):", self.warnings.len()));
            for warning in &self.warnings {
                out.warning(warning);
            }
            out.newline();
        }

        out.section(&format!("Parsed ({} API, revision {})", self.api, self.revision));
        out.key_value("  features", &self.counts.features.to_string());
        out.key_value("  extensions", &self.counts.extensions.to_string());
        out.key_value("  commands", &self.counts.commands.to_string());
        out.key_value("  enums", &self.counts.enums.to_string());
        out.key_value("  groups", &self.counts.groups.to_string());
        out.key_value("  types", &self.counts.types.to_string());
        out.newline();

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
            GenerationResult::UpToDate { revision } => {
                out.preformatted(&format!(
                    "Output tree is up to date (revision {revision}); use --force to regenerate"
                ));
            }
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(debug_dir) = &written.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
            out.newline();
        }

        out.key_value("Generated", &written.output_dir.display().to_string());
        out.key_value(
            "Files",
            &format!("{} written, {} unchanged", written.written, written.unchanged),
        );
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}
