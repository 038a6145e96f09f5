//! The `bitfield.h` artifact: one flags type per bitfield group.

use std::collections::BTreeSet;

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::{ApiRegistry, Enum};

use super::{close_namespace, open_namespace, push_banner, push_enum_members};
use crate::Subtree;

/// Fallback flags type for bitfield constants outside any resolved group.
const GENERIC_GROUP: &str = "UnusedMask";

pub struct BitfieldHeader<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
    subtree: Subtree,
}

impl<'a> BitfieldHeader<'a> {
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
            .filter(|e| e.kind.is_bitfield())
            .filter(|e| self.subtree.selects_enum(self.resolved, &e.name))
            .collect();

        // constants in a resolved bitfield group render under its flags
        // type; everything else falls back to the generic one
        let mut fallback: Vec<&Enum> = Vec::new();
        let mut grouped: Vec<(&str, Vec<&Enum>)> = Vec::new();
        for e in &selected {
            let groups: Vec<&String> = self
                .resolved
                .enum_groups
                .get(&e.name)
                .map(|gs| {
                    gs.iter()
                        .filter(|g| self.resolved.is_bitfield_group(g))
                        .collect()
                })
                .unwrap_or_default();
            if groups.is_empty() {
                fallback.push(e);
                continue;
            }
            for group in groups {
                match grouped.iter_mut().find(|(name, _)| *name == group.as_str()) {
                    Some((_, members)) => members.push(e),
                    None => grouped.push((group.as_str(), vec![e])),
                }
            }
        }
        grouped.sort_by_key(|(name, _)| *name);

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        open_namespace(&mut b, &ns);

        let mut seen = BTreeSet::new();
        let mut first = true;
        for (name, members) in &grouped {
            if !first {
                b.push_blank();
            }
            first = false;
            push_flags_type(&mut b, name, members, &mut seen);
        }
        if !fallback.is_empty() {
            if !first {
                b.push_blank();
            }
            push_flags_type(&mut b, GENERIC_GROUP, &fallback, &mut seen);
        }

        close_namespace(&mut b, &ns);
        b.build()
    }
}

fn push_flags_type(
    b: &mut CodeBuilder,
    name: &str,
    members: &[&Enum],
    seen: &mut BTreeSet<String>,
) {
    b.push_line(&format!("enum class {name} : unsigned int"))
        .push_line("{")
        .push_indent();
    push_enum_members(b, members, seen);
    b.push_dedent().push_line("};");
}

#[cfg(test)]
mod tests {
    use khrgen_ir::EnumKind;

    use super::*;

    fn bitfield(name: &str, value: &str, group: Option<&str>) -> Enum {
        let mut e = Enum::new(name, value.parse().unwrap(), EnumKind::Bitfield);
        e.group = group.map(str::to_string);
        e
    }

    #[test]
    fn test_flags_type_per_group() {
        let mut reg = ApiRegistry::new("gl");
        reg.enums
            .push(bitfield("GL_MAP_READ_BIT", "0x1", Some("MapBufferAccessMask")));

        let mut resolved = ResolvedApi::default();
        resolved.enums.insert("GL_MAP_READ_BIT".into(), Default::default());
        resolved
            .enum_groups
            .insert("GL_MAP_READ_BIT".into(), vec!["MapBufferAccessMask".into()]);
        resolved.bitfield_groups = vec!["MapBufferAccessMask".into()];

        let header = BitfieldHeader::new(&reg, &resolved, Subtree::all()).render();

        assert!(header.contains("enum class MapBufferAccessMask : unsigned int"));
        assert!(header.contains("GL_MAP_READ_BIT = 0x1,"));
        assert!(!header.contains("UnusedMask"));
    }

    #[test]
    fn test_unresolved_group_falls_back_to_generic() {
        let mut reg = ApiRegistry::new("gl");
        reg.enums
            .push(bitfield("GL_LONE_BIT", "0x1", Some("NowhereMask")));

        let mut resolved = ResolvedApi::default();
        resolved.enums.insert("GL_LONE_BIT".into(), Default::default());

        let header = BitfieldHeader::new(&reg, &resolved, Subtree::all()).render();

        assert!(header.contains("enum class UnusedMask : unsigned int"));
        assert!(header.contains("GL_LONE_BIT = 0x1,"));
        assert!(!header.contains("NowhereMask"));
    }

    #[test]
    fn test_member_of_two_groups_defined_once() {
        let mut reg = ApiRegistry::new("gl");
        reg.enums
            .push(bitfield("GL_SHARED_BIT", "0x1", Some("MaskA")));

        let mut resolved = ResolvedApi::default();
        resolved.enums.insert("GL_SHARED_BIT".into(), Default::default());
        resolved
            .enum_groups
            .insert("GL_SHARED_BIT".into(), vec!["MaskA".into(), "MaskB".into()]);
        resolved.bitfield_groups = vec!["MaskA".into(), "MaskB".into()];

        let header = BitfieldHeader::new(&reg, &resolved, Subtree::all()).render();

        let active: Vec<&str> = header
            .lines()
            .filter(|l| l.trim_start().starts_with("GL_SHARED_BIT"))
            .collect();
        let reused: Vec<&str> = header
            .lines()
            .filter(|l| l.trim_start().starts_with("// GL_SHARED_BIT"))
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(reused.len(), 1);
    }
}
