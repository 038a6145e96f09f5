//! The `boolean.h` artifact.

use std::collections::BTreeSet;

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::{ApiRegistry, Enum, EnumKind};

use super::{close_namespace, open_namespace, push_banner, push_enum_members};
use crate::Subtree;

pub struct BooleanHeader<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
    subtree: Subtree,
}

impl<'a> BooleanHeader<'a> {
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
            .filter(|e| e.kind == EnumKind::Boolean)
            .filter(|e| self.subtree.selects_enum(self.resolved, &e.name))
            .collect();

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        open_namespace(&mut b, &ns);

        b.push_line("enum class GLboolean : unsigned char")
            .push_line("{")
            .push_indent();
        let mut seen = BTreeSet::new();
        push_enum_members(&mut b, &selected, &mut seen);
        b.push_dedent().push_line("};");

        close_namespace(&mut b, &ns);
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans_only() {
        let mut reg = ApiRegistry::new("gl");
        reg.enums
            .push(Enum::new("GL_FALSE", "0".parse().unwrap(), EnumKind::Boolean));
        reg.enums
            .push(Enum::new("GL_TRUE", "1".parse().unwrap(), EnumKind::Boolean));
        reg.enums
            .push(Enum::new("GL_POINTS", "0".parse().unwrap(), EnumKind::Enum));

        let mut resolved = ResolvedApi::default();
        for name in ["GL_FALSE", "GL_TRUE", "GL_POINTS"] {
            resolved.enums.insert(name.into(), Default::default());
        }

        let header = BooleanHeader::new(&reg, &resolved, Subtree::all()).render();

        assert!(header.contains("enum class GLboolean : unsigned char"));
        assert!(header.contains("GL_FALSE = 0,"));
        assert!(header.contains("GL_TRUE = 1,"));
        assert!(!header.contains("GL_POINTS"));
    }
}
