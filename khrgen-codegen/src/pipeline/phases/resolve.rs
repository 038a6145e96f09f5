//! Resolve phase - builds the cross-reference maps.
//!
//! One scan over all features/extensions per entity populates the
//! requirement references; O(entities × features) is acceptable for a
//! registry with a few thousand entities and a few dozen feature versions.

use std::collections::BTreeSet;

use eyre::{Result, bail};
use khrgen_ir::ApiRegistry;

use crate::incore::IncoreTable;
use crate::pipeline::{Diagnostic, GenerationContext, Phase};
use crate::resolved::{ResolvedApi, SupportInfo};

/// Phase that resolves all cross-entity references into immutable maps.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Build cross-reference maps from the parsed entity set"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let resolved = resolve_registry(&ctx.registry, &ctx.incore)?;

        for (target, owner) in &resolved.unresolved_aliases {
            ctx.add_diagnostic(
                Diagnostic::warning(self.name(), format!("unresolved alias '{target}'"))
                    .at(owner.clone()),
            );
        }

        ctx.resolved = Some(resolved);
        Ok(())
    }
}

/// Resolve a parsed registry into its cross-reference maps.
///
/// # Errors
///
/// Fails when the alias graph contains a cycle; everything else is
/// recorded in the result for the verify phase to report.
pub fn resolve_registry(registry: &ApiRegistry, incore: &IncoreTable) -> Result<ResolvedApi> {
    let mut resolved = ResolvedApi::default();

    let enum_names: BTreeSet<&str> = registry.enums.iter().map(|e| e.name.as_str()).collect();

    for e in &registry.enums {
        let mut info = SupportInfo::default();
        for feature in &registry.features {
            if feature.req_enums.iter().any(|n| *n == e.name) {
                info.req_features.push(feature.version);
            }
            if feature.rem_enums.iter().any(|n| *n == e.name) {
                info.rem_features.push(feature.version);
            }
        }
        for extension in &registry.extensions {
            if extension.req_enums.iter().any(|n| *n == e.name) {
                info.req_extensions.push(extension.name.clone());
            }
        }
        info.req_features.sort();
        info.rem_features.sort();
        info.req_extensions.sort();
        resolved.enums.insert(e.name.clone(), info);
    }

    for command in &registry.commands {
        let mut info = SupportInfo::default();
        for feature in &registry.features {
            if feature.req_commands.iter().any(|n| *n == command.name) {
                info.req_features.push(feature.version);
            }
            if feature.rem_commands.iter().any(|n| *n == command.name) {
                info.rem_features.push(feature.version);
            }
        }
        for extension in &registry.extensions {
            if extension.req_commands.iter().any(|n| *n == command.name) {
                info.req_extensions.push(extension.name.clone());
            }
        }
        info.req_features.sort();
        info.rem_features.sort();
        info.req_extensions.sort();
        resolved.commands.insert(command.name.clone(), info);
    }

    // a group is known when it is explicitly defined or referenced by a
    // command parameter; a tag known only through its own enum is
    // unresolved and falls back to the generic type at emission
    let mut known_groups: BTreeSet<&str> = registry
        .groups
        .iter()
        .filter(|g| g.explicit)
        .map(|g| g.name.as_str())
        .collect();
    for command in &registry.commands {
        for param in &command.params {
            if let Some(group) = &param.group {
                known_groups.insert(group.as_str());
            }
        }
    }

    for group in &registry.groups {
        if !known_groups.contains(group.name.as_str()) {
            continue;
        }
        let mut members: Vec<String> = Vec::new();
        for member in &group.members {
            if enum_names.contains(member.as_str()) && !members.contains(member) {
                members.push(member.clone());
            }
        }
        for member in &members {
            let groups = resolved.enum_groups.entry(member.clone()).or_default();
            if !groups.contains(&group.name) {
                groups.push(group.name.clone());
            }
        }
        resolved.group_members.insert(group.name.clone(), members);
    }
    for groups in resolved.enum_groups.values_mut() {
        groups.sort();
    }

    for e in &registry.enums {
        if let Some(tag) = &e.group {
            if !known_groups.contains(tag.as_str()) {
                resolved
                    .unresolved_groups
                    .push((tag.clone(), e.name.clone()));
            }
        }

        if let Some(alias) = &e.alias {
            // aliases may point into another api and are only resolved
            // against this api's enum set
            if enum_names.contains(alias.as_str()) {
                resolved.aliases.insert(e.name.clone(), alias.clone());
            } else {
                resolved
                    .unresolved_aliases
                    .push((alias.clone(), e.name.clone()));
            }
        }
    }

    check_alias_cycles(&resolved)?;

    // bitfield groups: non-empty, every member of bitfield kind
    resolved.bitfield_groups = resolved
        .group_members
        .iter()
        .filter(|(_, members)| {
            !members.is_empty()
                && members.iter().all(|m| {
                    registry
                        .enum_by_name(m)
                        .is_some_and(|e| e.kind.is_bitfield())
                })
        })
        .map(|(name, _)| name.clone())
        .collect();
    resolved.bitfield_groups.sort();

    for extension in &registry.extensions {
        if let Some(version) = incore.get(&extension.name) {
            resolved.incore.insert(extension.name.clone(), version);
        }
    }

    Ok(resolved)
}

/// Walk every alias chain with a visited set; a cycle is a fatal error
/// rather than an unbounded recursion at support-test time.
fn check_alias_cycles(resolved: &ResolvedApi) -> Result<()> {
    for start in resolved.aliases.keys() {
        let mut visited: Vec<&str> = vec![start];
        let mut current = start.as_str();
        while let Some(next) = resolved.aliases.get(current) {
            if visited.iter().any(|v| *v == next.as_str()) {
                bail!("alias cycle detected involving '{start}'");
            }
            visited.push(next);
            current = next;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use khrgen_core::Version;
    use khrgen_ir::{Command, Enum, EnumKind, Extension, Feature, Group, Parameter, TypeDesc};

    use super::*;

    fn registry_with_feature() -> ApiRegistry {
        let mut reg = ApiRegistry::new("gl");
        let mut feature = Feature::new("gl", Version::new(1, 0));
        feature.req_enums.push("GL_FOO".into());
        feature.req_commands.push("glBar".into());
        reg.features.push(feature);
        reg.enums
            .push(Enum::new("GL_FOO", "0x1".parse().unwrap(), EnumKind::Enum));
        reg.commands.push(Command {
            name: "glBar".into(),
            return_type: TypeDesc::plain("void"),
            params: Vec::new(),
        });
        reg
    }

    #[test]
    fn test_requirements_resolved() {
        let resolved = resolve_registry(&registry_with_feature(), &IncoreTable::default()).unwrap();

        assert_eq!(
            resolved.enums["GL_FOO"].first_required(),
            Some(Version::new(1, 0))
        );
        assert_eq!(
            resolved.commands["glBar"].first_required(),
            Some(Version::new(1, 0))
        );
    }

    #[test]
    fn test_extension_association_is_one_to_one() {
        let mut reg = registry_with_feature();
        reg.extensions.push(Extension {
            name: "GL_ARB_one".into(),
            apis: vec!["gl".into()],
            req_enums: Vec::new(),
            req_commands: vec!["glBar".into()],
        });
        reg.extensions.push(Extension {
            name: "GL_ARB_other".into(),
            apis: vec!["gl".into()],
            req_enums: Vec::new(),
            req_commands: Vec::new(),
        });

        let resolved = resolve_registry(&reg, &IncoreTable::default()).unwrap();

        // only the requiring extension appears, not the whole collection
        assert_eq!(resolved.commands["glBar"].req_extensions, vec!["GL_ARB_one"]);
    }

    #[test]
    fn test_group_membership_reciprocal() {
        let mut reg = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_MAP_READ_BIT", "0x1".parse().unwrap(), EnumKind::Bitfield);
        e.group = Some("MapBufferAccessMask".into());
        reg.enums.push(e);
        let mut group = Group::explicit("MapBufferAccessMask");
        group.members.push("GL_MAP_READ_BIT".into());
        group.members.push("GL_MISSING_BIT".into());
        reg.groups.push(group);

        let resolved = resolve_registry(&reg, &IncoreTable::default()).unwrap();

        assert_eq!(
            resolved.group_members["MapBufferAccessMask"],
            vec!["GL_MAP_READ_BIT"]
        );
        assert_eq!(
            resolved.enum_groups["GL_MAP_READ_BIT"],
            vec!["MapBufferAccessMask"]
        );
        assert_eq!(resolved.bitfield_groups, vec!["MapBufferAccessMask"]);
    }

    #[test]
    fn test_unknown_group_tag_recorded() {
        let mut reg = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_LONE_BIT", "0x1".parse().unwrap(), EnumKind::Bitfield);
        e.group = Some("NowhereMask".into());
        reg.enums.push(e);
        // the implicit group exists but nothing else references it
        let mut group = Group::new("NowhereMask");
        group.members.push("GL_LONE_BIT".into());
        reg.groups.push(group);

        let resolved = resolve_registry(&reg, &IncoreTable::default()).unwrap();

        assert_eq!(
            resolved.unresolved_groups,
            vec![("NowhereMask".to_string(), "GL_LONE_BIT".to_string())]
        );
        assert!(resolved.bitfield_groups.is_empty());
    }

    #[test]
    fn test_unresolved_alias_recorded() {
        let mut reg = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_NEW", "0x1".parse().unwrap(), EnumKind::Enum);
        e.alias = Some("GL_FROM_OTHER_API".into());
        reg.enums.push(e);

        let resolved = resolve_registry(&reg, &IncoreTable::default()).unwrap();

        assert!(resolved.aliases.is_empty());
        assert_eq!(
            resolved.unresolved_aliases,
            vec![("GL_FROM_OTHER_API".to_string(), "GL_NEW".to_string())]
        );
    }

    #[test]
    fn test_alias_cycle_is_fatal() {
        let mut reg = ApiRegistry::new("gl");
        let mut a = Enum::new("GL_A", "0x1".parse().unwrap(), EnumKind::Enum);
        a.alias = Some("GL_B".into());
        let mut b = Enum::new("GL_B", "0x2".parse().unwrap(), EnumKind::Enum);
        b.alias = Some("GL_A".into());
        reg.enums.push(a);
        reg.enums.push(b);

        assert!(resolve_registry(&reg, &IncoreTable::default()).is_err());
    }

    #[test]
    fn test_incore_stamping() {
        let mut reg = ApiRegistry::new("gl");
        reg.extensions.push(Extension {
            name: "GL_ARB_compute_shader".into(),
            apis: vec!["gl".into()],
            req_enums: Vec::new(),
            req_commands: Vec::new(),
        });
        reg.extensions.push(Extension {
            name: "GL_EXT_never_core".into(),
            apis: vec!["gl".into()],
            req_enums: Vec::new(),
            req_commands: Vec::new(),
        });

        let incore = IncoreTable::from_toml(
            r#"
[extensions]
GL_ARB_compute_shader = "4.3"
"#,
        )
        .unwrap();
        let resolved = resolve_registry(&reg, &incore).unwrap();

        assert_eq!(
            resolved.incore.get("GL_ARB_compute_shader"),
            Some(&Version::new(4, 3))
        );
        assert!(!resolved.incore.contains_key("GL_EXT_never_core"));
    }

    #[test]
    fn test_param_reference_makes_group_known() {
        let mut reg = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_USED_BIT", "0x1".parse().unwrap(), EnumKind::Bitfield);
        e.group = Some("UsedMask".into());
        reg.enums.push(e);
        let mut group = Group::new("UsedMask");
        group.members.push("GL_USED_BIT".into());
        reg.groups.push(group);
        reg.commands.push(Command {
            name: "glUse".into(),
            return_type: TypeDesc::plain("void"),
            params: vec![Parameter {
                name: "mask".into(),
                ty: TypeDesc::plain("GLbitfield"),
                group: Some("UsedMask".into()),
            }],
        });

        let resolved = resolve_registry(&reg, &IncoreTable::default()).unwrap();

        assert!(resolved.unresolved_groups.is_empty());
        assert_eq!(resolved.bitfield_groups, vec!["UsedMask"]);
    }
}
