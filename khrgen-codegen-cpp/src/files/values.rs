//! The `values.h` artifact: special numbers with concrete scalar types.

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::{ApiRegistry, Enum, EnumKind};

use super::{close_namespace, open_namespace, push_banner};
use crate::Subtree;

pub struct ValuesHeader<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
    subtree: Subtree,
}

impl<'a> ValuesHeader<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi, subtree: Subtree) -> Self {
        Self {
            registry,
            resolved,
            subtree,
        }
    }

    pub fn render(&self) -> String {
        let ns = self.subtree.namespace(&self.registry.api);

        let selected: Vec<&Enum> = self
            .registry
            .enums
            .iter()
            .filter(|e| matches!(e.kind, EnumKind::Special(_)))
            .filter(|e| self.subtree.selects_enum(self.resolved, &e.name))
            .collect();

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        b.push_line(&format!("#include <glapi/{}/types.h>", ns)).push_blank();
        open_namespace(&mut b, &ns);

        for e in &selected {
            b.push_line(&format!(
                "static const {} {} = {};",
                e.kind.scalar_type(),
                e.name,
                e.value.literal
            ));
        }

        close_namespace(&mut b, &ns);
        b.build()
    }
}
