//! The `extension.h` artifact.

use khrgen_codegen::CodeBuilder;
use khrgen_ir::ApiRegistry;

use super::{close_namespace, open_namespace, push_banner};

pub struct ExtensionHeader<'a> {
    registry: &'a ApiRegistry,
}

impl<'a> ExtensionHeader<'a> {
    pub fn new(registry: &'a ApiRegistry) -> Self {
        Self { registry }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        open_namespace(&mut b, api);

        b.push_line("enum class GLextension : int")
            .push_line("{")
            .push_indent()
            .push_line("UNKNOWN = -1,")
            .push_blank();
        for extension in &self.registry.extensions {
            b.push_line(&format!("{},", extension.name));
        }
        b.push_dedent().push_line("};");

        close_namespace(&mut b, api);
        b.build()
    }
}
