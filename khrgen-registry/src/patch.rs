//! Patch overlay.
//!
//! A patch document shares the registry schema and carries hand-maintained
//! corrections for upstream omissions. The merge is name-keyed and strictly
//! additive: entities absent from the base set are inserted, present ones
//! receive field overlays, and nothing is ever removed.

use khrgen_ir::ApiRegistry;

use crate::parse::groups::add_implicit_member;

/// Merge a parsed patch registry into the base entity set.
pub fn apply_patch(base: &mut ApiRegistry, patch: &ApiRegistry) {
    patch_types(base, patch);
    patch_commands(base, patch);
    patch_enums(base, patch);
    patch_groups(base, patch);
}

/// Types are append-only: an unknown name is inserted, a known one kept.
fn patch_types(base: &mut ApiRegistry, patch: &ApiRegistry) {
    for ty in &patch.types {
        if base.types.iter().all(|t| t.name != ty.name) {
            base.types.push(ty.clone());
        }
    }
}

/// Commands overlay per-parameter group-tag and type corrections, matched
/// by parameter name; unknown commands are inserted.
fn patch_commands(base: &mut ApiRegistry, patch: &ApiRegistry) {
    for cmd in &patch.commands {
        match base.commands.iter_mut().find(|c| c.name == cmd.name) {
            Some(existing) => {
                for param in &cmd.params {
                    if let Some(target) =
                        existing.params.iter_mut().find(|p| p.name == param.name)
                    {
                        target.ty = param.ty.clone();
                        if param.group.is_some() {
                            target.group = param.group.clone();
                        }
                    }
                }
            }
            None => base.commands.push(cmd.clone()),
        }
    }
    base.commands.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Enums insert unknown names (creating their implicit group if needed)
/// and overlay alias corrections on known ones.
fn patch_enums(base: &mut ApiRegistry, patch: &ApiRegistry) {
    for e in &patch.enums {
        match base.enums.iter_mut().find(|b| b.name == e.name) {
            Some(existing) => {
                if e.alias.is_some() {
                    existing.alias = e.alias.clone();
                }
            }
            None => {
                add_implicit_member(&mut base.groups, e);
                base.enums.push(e.clone());
            }
        }
    }
    base.enums.sort();
    base.groups.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Groups insert unknown names and append member names to known ones.
/// An explicit patch definition upgrades a base group that was only
/// inferred from enum tags.
fn patch_groups(base: &mut ApiRegistry, patch: &ApiRegistry) {
    for group in &patch.groups {
        match base.groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => {
                existing.explicit |= group.explicit;
                for member in &group.members {
                    if !existing.members.contains(member) {
                        existing.members.push(member.clone());
                    }
                }
            }
            None => base.groups.push(group.clone()),
        }
    }
    base.groups.sort_by(|a, b| a.name.cmp(&b.name));
}

#[cfg(test)]
mod tests {
    use khrgen_ir::{Command, Enum, EnumKind, Group, Parameter, TypeDef, TypeDesc};

    use super::*;

    fn base_registry() -> ApiRegistry {
        let mut reg = ApiRegistry::new("gl");
        reg.enums
            .push(Enum::new("GL_EXISTING", "0x1".parse().unwrap(), EnumKind::Enum));
        reg.commands.push(Command {
            name: "glExisting".into(),
            return_type: TypeDesc::plain("void"),
            params: vec![Parameter {
                name: "flags".into(),
                ty: TypeDesc::plain("GLbitfield"),
                group: None,
            }],
        });
        reg.types.push(TypeDef {
            name: "GLenum".into(),
            decl: "typedef unsigned int GLenum;".into(),
        });
        reg
    }

    #[test]
    fn test_enum_insert_creates_implicit_group() {
        let mut base = base_registry();
        let mut patch = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_PATCHED_BIT", "0x2".parse().unwrap(), EnumKind::Bitfield);
        e.group = Some("PatchedMask".into());
        patch.enums.push(e);

        apply_patch(&mut base, &patch);

        assert!(base.enum_by_name("GL_PATCHED_BIT").is_some());
        let group = base.group_by_name("PatchedMask").expect("implicit group");
        assert_eq!(group.members, vec!["GL_PATCHED_BIT"]);
    }

    #[test]
    fn test_enum_overlay_only_corrects_alias() {
        let mut base = base_registry();
        let mut patch = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_EXISTING", "0xFF".parse().unwrap(), EnumKind::Bitfield);
        e.alias = Some("GL_OTHER".into());
        patch.enums.push(e);

        apply_patch(&mut base, &patch);

        let existing = base.enum_by_name("GL_EXISTING").unwrap();
        // value and kind keep the base definition, only the alias is overlaid
        assert_eq!(existing.value.number, 0x1);
        assert_eq!(existing.kind, EnumKind::Enum);
        assert_eq!(existing.alias.as_deref(), Some("GL_OTHER"));
    }

    #[test]
    fn test_command_param_correction_by_name() {
        let mut base = base_registry();
        let mut patch = ApiRegistry::new("gl");
        patch.commands.push(Command {
            name: "glExisting".into(),
            return_type: TypeDesc::plain("void"),
            params: vec![Parameter {
                name: "flags".into(),
                ty: TypeDesc::plain("GLbitfield"),
                group: Some("MapBufferAccessMask".into()),
            }],
        });

        apply_patch(&mut base, &patch);

        let cmd = base.command_by_name("glExisting").unwrap();
        assert_eq!(cmd.params[0].group.as_deref(), Some("MapBufferAccessMask"));
    }

    #[test]
    fn test_types_append_only() {
        let mut base = base_registry();
        let mut patch = ApiRegistry::new("gl");
        patch.types.push(TypeDef {
            name: "GLenum".into(),
            decl: "typedef int GLenum;".into(),
        });
        patch.types.push(TypeDef {
            name: "GLclampx".into(),
            decl: "typedef int GLclampx;".into(),
        });

        apply_patch(&mut base, &patch);

        assert_eq!(base.types.len(), 2);
        // existing declaration untouched
        assert_eq!(base.types[0].decl, "typedef unsigned int GLenum;");
    }

    #[test]
    fn test_group_member_append() {
        let mut base = base_registry();
        let mut attrib_mask = Group::explicit("AttribMask");
        attrib_mask.members.push("GL_CURRENT_BIT".into());
        base.groups.push(attrib_mask);
        let mut patch = ApiRegistry::new("gl");
        let mut patched_mask = Group::explicit("AttribMask");
        patched_mask.members.push("GL_DEPTH_BUFFER_BIT".into());
        patch.groups.push(patched_mask);

        apply_patch(&mut base, &patch);

        let group = base.group_by_name("AttribMask").unwrap();
        assert_eq!(group.members, vec!["GL_CURRENT_BIT", "GL_DEPTH_BUFFER_BIT"]);
    }

    #[test]
    fn test_patch_never_removes() {
        let mut base = base_registry();
        let patch = ApiRegistry::new("gl");

        apply_patch(&mut base, &patch);

        assert_eq!(base.enums.len(), 1);
        assert_eq!(base.commands.len(), 1);
        assert_eq!(base.types.len(), 1);
    }
}
