//! The `types.h` artifact: typedef passthrough plus flags-type forward
//! declarations.

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::ApiRegistry;

use super::{close_namespace, open_namespace, push_banner};
use crate::Subtree;

pub struct TypesHeader<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
    subtree: Subtree,
}

impl<'a> TypesHeader<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi, subtree: Subtree) -> Self {
        Self {
            registry,
            resolved,
            subtree,
        }
    }

    pub fn render(&self) -> String {
        let ns = self.subtree.namespace(&self.registry.api);

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        open_namespace(&mut b, &ns);

        for ty in &self.registry.types {
            b.push_lines(&ty.decl);
        }

        if !self.resolved.bitfield_groups.is_empty() {
            b.push_blank();
            for group in &self.resolved.bitfield_groups {
                b.push_line(&format!("enum class {group} : unsigned int;"));
            }
        }

        close_namespace(&mut b, &ns);
        b.build()
    }
}
