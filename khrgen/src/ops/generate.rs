//! Generate operation - binding generation from a parsed registry.

use std::path::Path;

use eyre::{Context, Result};
use khrgen_codegen::{
    IncoreTable,
    pipeline::{Pipeline, SnapshotPlugin},
};
use khrgen_codegen_cpp::Generator;
use khrgen_ir::ApiRegistry;

use crate::reports::{
    EntityCounts, GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output directory for the generated source tree.
    pub output_dir: &'a Path,
    /// Registry revision from the side file.
    pub revision: u32,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to output debug snapshots.
    pub visualize: bool,
    /// Whether to bypass the revision gate.
    pub force: bool,
}

/// Execute the generate operation.
///
/// Runs the pipeline on the parsed registry and renders the binding source
/// tree, honoring the revision gate unless forced.
pub fn generate(
    registry: ApiRegistry,
    patch: Option<ApiRegistry>,
    incore: IncoreTable,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let api = registry.api.clone();
    let counts = EntityCounts::of(&registry);

    let debug_dir = opts.output_dir.join(".khrgen/debug");
    let pipeline = if opts.visualize {
        Pipeline::new().plugin(SnapshotPlugin::with_output_dir(&debug_dir))
    } else {
        Pipeline::new()
    };

    let ctx = pipeline
        .run(registry, patch, incore)
        .wrap_err("Resolution failed")?;
    let warnings: Vec<String> = ctx.warnings().map(|d| d.to_string()).collect();

    let generator = Generator::new(&ctx, opts.revision);

    let result = if !opts.force && !opts.dry_run && generator.up_to_date(opts.output_dir) {
        GenerationResult::UpToDate {
            revision: opts.revision,
        }
    } else if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: generator
                .preview()
                .into_iter()
                .map(|f| PreviewFile {
                    path: f.path,
                    content: f.content,
                })
                .collect(),
        })
    } else {
        let summary = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to write the output tree")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: summary.written,
            unchanged: summary.unchanged,
            debug_dir: opts.visualize.then_some(debug_dir),
        })
    };

    Ok(GenerateReport {
        api,
        revision: opts.revision,
        counts,
        warnings,
        result,
    })
}
