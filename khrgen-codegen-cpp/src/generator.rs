//! The generator facade: plans every artifact and writes the output tree.

use std::path::Path;

use eyre::Result;
use khrgen_codegen::{PreviewFile, pipeline::GenerationContext};
use khrgen_core::{GeneratedFile, WriteResult};
use khrgen_ir::EnumKind;

use crate::files::{
    BindingHeader, BindingObjects, BitfieldHeader, BitfieldsByString, BooleanHeader, EnumHeader,
    EnumsByString, ExtensionHeader, ExtensionsByFunctionString, ExtensionsByString,
    FunctionImplementations, FunctionStringsByExtension, FunctionsHeader, ReqVersionsByExtension,
    RevisionHeader, StringsByBitfield, StringsByEnum, StringsByExtension, TypesHeader,
    UmbrellaHeader, ValidVersions, ValuesHeader,
};
use crate::subtree::subtrees_for;

/// C++ generator producing the complete `glapi` source tree.
///
/// Rendering is a pure function of the resolved context; regenerating with
/// the same inputs produces byte-identical artifacts.
pub struct Generator<'a> {
    ctx: &'a GenerationContext,
    revision: u32,
}

/// Result of writing the output tree.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Files written (new or changed content).
    pub written: usize,
    /// Files left untouched because content was identical.
    pub unchanged: usize,
    /// All artifact paths, relative to the output root.
    pub paths: Vec<String>,
}

impl<'a> Generator<'a> {
    pub fn new(ctx: &'a GenerationContext, revision: u32) -> Self {
        Self { ctx, revision }
    }

    /// Render every artifact without touching the filesystem.
    pub fn preview(&self) -> Vec<PreviewFile> {
        let registry = &self.ctx.registry;
        let resolved = self.ctx.resolved();
        let api = &registry.api;

        let mut files = Vec::new();

        for subtree in subtrees_for(registry.features.iter().map(|f| f.version)) {
            let dir = format!("include/glapi/{}", subtree.namespace(api));
            files.push(PreviewFile::new(
                format!("{dir}/types.h"),
                TypesHeader::new(registry, resolved, subtree).render(),
            ));
            files.push(PreviewFile::new(
                format!("{dir}/values.h"),
                ValuesHeader::new(registry, resolved, subtree).render(),
            ));
            files.push(PreviewFile::new(
                format!("{dir}/boolean.h"),
                BooleanHeader::new(registry, resolved, subtree).render(),
            ));
            files.push(PreviewFile::new(
                format!("{dir}/enum.h"),
                EnumHeader::new(registry, resolved, subtree).render(),
            ));
            files.push(PreviewFile::new(
                format!("{dir}/bitfield.h"),
                BitfieldHeader::new(registry, resolved, subtree).render(),
            ));
            files.push(PreviewFile::new(
                format!("{dir}/functions.h"),
                FunctionsHeader::new(registry, resolved, subtree).render(),
            ));
            files.push(PreviewFile::new(
                format!("{dir}/gl.h"),
                UmbrellaHeader::new(api, subtree).render(),
            ));
        }

        files.push(PreviewFile::new(
            format!("include/glapi/{api}/extension.h"),
            ExtensionHeader::new(registry).render(),
        ));
        files.push(PreviewFile::new(
            "include/glapi/Binding.h",
            BindingHeader::new(registry, resolved).render(),
        ));

        files.push(PreviewFile::new(
            format!("source/{api}/functions.cpp"),
            FunctionImplementations::new(registry, resolved).render(),
        ));
        files.push(PreviewFile::new(
            "source/Binding_objects.cpp",
            BindingObjects::new(registry, resolved).render(),
        ));
        files.push(PreviewFile::new(
            "source/Version_ValidVersions.cpp",
            ValidVersions::new(registry).render(),
        ));
        files.push(PreviewFile::new(
            "source/glrevision.h",
            RevisionHeader::new(self.revision).render(),
        ));

        files.push(PreviewFile::new(
            "source/Meta_StringsByEnum.cpp",
            StringsByEnum::new(registry, EnumKind::Enum).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_EnumsByString.cpp",
            EnumsByString::new(registry, EnumKind::Enum).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_StringsByBoolean.cpp",
            StringsByEnum::new(registry, EnumKind::Boolean).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_BooleansByString.cpp",
            EnumsByString::new(registry, EnumKind::Boolean).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_StringsByBitfield.cpp",
            StringsByBitfield::new(registry, resolved).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_BitfieldsByString.cpp",
            BitfieldsByString::new(registry, resolved).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_StringsByExtension.cpp",
            StringsByExtension::new(registry).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_ExtensionsByString.cpp",
            ExtensionsByString::new(registry).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_ReqVersionsByExtension.cpp",
            ReqVersionsByExtension::new(registry, resolved).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_FunctionStringsByExtension.cpp",
            FunctionStringsByExtension::new(registry).render(),
        ));
        files.push(PreviewFile::new(
            "source/Meta_ExtensionsByFunctionString.cpp",
            ExtensionsByFunctionString::new(registry, resolved).render(),
        ));

        files
    }

    /// Whether the output tree already carries this registry revision.
    ///
    /// The revision number only gates regeneration; content comparison on
    /// write keeps mtimes stable when individual artifacts are unchanged.
    pub fn up_to_date(&self, output_dir: &Path) -> bool {
        std::fs::read_to_string(output_dir.join("source/glrevision.h"))
            .ok()
            .and_then(|content| RevisionHeader::parse(&content))
            == Some(self.revision)
    }

    /// Render and write the complete output tree.
    pub fn generate(&self, output_dir: &Path) -> Result<GenerateSummary> {
        let mut summary = GenerateSummary::default();

        for file in self.preview() {
            match file.write(output_dir)? {
                WriteResult::Written => summary.written += 1,
                WriteResult::Unchanged => summary.unchanged += 1,
            }
            summary.paths.push(file.path);
        }

        Ok(summary)
    }
}
