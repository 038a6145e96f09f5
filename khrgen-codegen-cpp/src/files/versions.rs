//! The `Version_ValidVersions.cpp` artifact.

use khrgen_codegen::CodeBuilder;
use khrgen_ir::ApiRegistry;

use super::{close_namespace, open_namespace, push_source_banner};

pub struct ValidVersions<'a> {
    registry: &'a ApiRegistry,
}

impl<'a> ValidVersions<'a> {
    pub fn new(registry: &'a ApiRegistry) -> Self {
        Self { registry }
    }

    pub fn render(&self) -> String {
        let mut b = CodeBuilder::cpp();
        push_source_banner(&mut b);
        b.push_line("#include <glapi/Version.h>").push_blank();
        open_namespace(&mut b, "glapi");

        b.push_line("const std::set<Version> Version::s_validVersions =")
            .push_line("{")
            .push_indent();
        for feature in &self.registry.features {
            b.push_line(&format!(
                "{{ {}, {} }},",
                feature.version.major(),
                feature.version.minor()
            ));
        }
        b.push_dedent().push_line("};");

        close_namespace(&mut b, "glapi");
        b.build()
    }
}
