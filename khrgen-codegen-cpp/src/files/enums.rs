//! The `enum.h` artifact: symbolic constants as a scoped enum.

use std::collections::BTreeSet;

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::{ApiRegistry, Enum, EnumKind};

use super::{close_namespace, open_namespace, push_banner, push_enum_members};
use crate::Subtree;

pub struct EnumHeader<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
    subtree: Subtree,
}

impl<'a> EnumHeader<'a> {
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
            .filter(|e| e.kind == EnumKind::Enum)
            .filter(|e| self.subtree.selects_enum(self.resolved, &e.name))
            .collect();

        // sections keyed by group name; enums outside any group render last
        let mut sections: Vec<(&str, Vec<&Enum>)> = Vec::new();
        let mut ungrouped: Vec<&Enum> = Vec::new();
        for e in &selected {
            match self.resolved.enum_groups.get(&e.name) {
                Some(groups) if !groups.is_empty() => {
                    for group in groups {
                        match sections.iter_mut().find(|(name, _)| *name == group.as_str()) {
                            Some((_, members)) => members.push(e),
                            None => sections.push((group.as_str(), vec![e])),
                        }
                    }
                }
                _ => ungrouped.push(e),
            }
        }
        sections.sort_by_key(|(name, _)| *name);

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        open_namespace(&mut b, &ns);

        b.push_line("enum class GLenum : unsigned int")
            .push_line("{")
            .push_indent();

        let mut seen = BTreeSet::new();
        let mut first = true;
        for (name, members) in &sections {
            if !first {
                b.push_blank();
            }
            first = false;
            b.push_comment(name).push_blank();
            push_enum_members(&mut b, members, &mut seen);
        }
        if !ungrouped.is_empty() {
            if !first {
                b.push_blank();
            }
            push_enum_members(&mut b, &ungrouped, &mut seen);
        }

        b.push_dedent().push_line("};");
        close_namespace(&mut b, &ns);
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use khrgen_codegen::SupportInfo;
    use khrgen_core::Version;
    use khrgen_ir::Feature;

    use super::*;
    use crate::Profile;

    fn registry_and_resolved() -> (ApiRegistry, ResolvedApi) {
        let mut reg = ApiRegistry::new("gl");
        let mut feature = Feature::new("gl", Version::new(1, 0));
        feature.req_enums.push("GL_FOO".into());
        reg.features.push(feature);
        reg.enums
            .push(Enum::new("GL_FOO", "0x1".parse().unwrap(), EnumKind::Enum));

        let mut resolved = ResolvedApi::default();
        resolved.enums.insert(
            "GL_FOO".into(),
            SupportInfo {
                req_features: vec![Version::new(1, 0)],
                rem_features: Vec::new(),
                req_extensions: Vec::new(),
            },
        );
        (reg, resolved)
    }

    #[test]
    fn test_single_definition_line() {
        let (reg, resolved) = registry_and_resolved();
        let header = EnumHeader::new(&reg, &resolved, Subtree::all()).render();

        let definition_lines: Vec<&str> = header
            .lines()
            .filter(|l| l.trim_start().starts_with("GL_FOO"))
            .collect();
        assert_eq!(definition_lines, vec!["    GL_FOO = 0x1,"]);
        assert!(header.contains("namespace gl\n"));
        assert!(header.contains("enum class GLenum : unsigned int"));
    }

    #[test]
    fn test_unsupported_enum_excluded() {
        let (reg, resolved) = registry_and_resolved();
        let subtree = Subtree::new(Version::new(0, 9), Profile::Compat);
        let header = EnumHeader::new(&reg, &resolved, subtree).render();

        assert!(!header.contains("GL_FOO"));
    }

    #[test]
    fn test_grouped_sections_sorted() {
        let (mut reg, mut resolved) = registry_and_resolved();
        reg.enums
            .push(Enum::new("GL_BAR", "0x2".parse().unwrap(), EnumKind::Enum));
        resolved.enums.insert("GL_BAR".into(), SupportInfo::default());
        resolved
            .enum_groups
            .insert("GL_BAR".into(), vec!["ZGroup".into()]);
        resolved
            .enum_groups
            .insert("GL_FOO".into(), vec!["AGroup".into()]);

        let header = EnumHeader::new(&reg, &resolved, Subtree::all()).render();
        let a_pos = header.find("// AGroup").unwrap();
        let z_pos = header.find("// ZGroup").unwrap();
        assert!(a_pos < z_pos);
    }
}
