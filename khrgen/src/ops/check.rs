//! Check operation - registry resolution and verification.

use std::path::Path;

use eyre::{Context, Result};
use khrgen_codegen::{
    IncoreTable,
    pipeline::{Pipeline, Severity},
};
use khrgen_ir::ApiRegistry;

use crate::reports::{CheckReport, EntityCounts};

/// Execute the check operation.
///
/// Runs the pipeline to resolve and verify the registry and returns the
/// collected diagnostics without emitting anything.
pub fn check(
    registry: ApiRegistry,
    patch: Option<ApiRegistry>,
    incore: IncoreTable,
    spec_path: &Path,
) -> Result<CheckReport> {
    let counts = EntityCounts::of(&registry);
    let api = registry.api.clone();

    let pipeline = Pipeline::new();
    let ctx = pipeline
        .run(registry, patch, incore)
        .wrap_err("Resolution failed")?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    Ok(CheckReport {
        spec_path: spec_path.to_path_buf(),
        api,
        counts,
        errors,
        warnings,
        infos,
    })
}

#[cfg(test)]
mod tests {
    use khrgen_registry::RegistryFile;

    use super::*;

    #[test]
    fn test_check_collects_warnings() {
        let registry = RegistryFile::from_source(
            r#"
<registry>
    <commands>
        <command>
            <proto>void <name>glClear</name></proto>
            <param><ptype>GLbitfield</ptype> <name>mask</name></param>
        </command>
    </commands>
    <feature api="gl" number="1.0">
        <require><command name="glClear"/></require>
    </feature>
</registry>
"#,
            "gl.xml",
        )
        .unwrap()
        .parse_api("gl")
        .unwrap();

        let report = check(
            registry,
            None,
            IncoreTable::default(),
            Path::new("gl.xml"),
        )
        .unwrap();

        assert!(!report.has_errors());
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("missing bitfield group"))
        );
        assert_eq!(report.counts.commands, 1);
    }
}
