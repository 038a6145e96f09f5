//! The per-subtree umbrella header (`gl.h`).

use khrgen_codegen::CodeBuilder;

use super::push_banner;
use crate::Subtree;

pub struct UmbrellaHeader<'a> {
    api: &'a str,
    subtree: Subtree,
}

impl<'a> UmbrellaHeader<'a> {
    pub fn new(api: &'a str, subtree: Subtree) -> Self {
        Self { api, subtree }
    }

    pub fn render(&self) -> String {
        let ns = self.subtree.namespace(self.api);

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        for header in ["types", "values", "boolean", "enum", "bitfield", "functions"] {
            b.push_line(&format!("#include <glapi/{ns}/{header}.h>"));
        }
        if self.subtree.feature.is_none() {
            b.push_line(&format!("#include <glapi/{ns}/extension.h>"));
        }
        b.build()
    }
}
