//! Verify phase - reports referential integrity issues.
//!
//! Everything here is a non-fatal diagnostic; generation proceeds with a
//! safe default (the generic bitfield type) for whatever failed to resolve.

use eyre::Result;

use crate::pipeline::{Diagnostic, GenerationContext, Phase};

/// Phase that checks bitfield-group references and group resolution.
pub struct VerifyPhase;

impl Phase for VerifyPhase {
    fn name(&self) -> &'static str {
        "verify"
    }

    fn description(&self) -> &'static str {
        "Report referential integrity issues in the resolved entity set"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let mut diagnostics = Vec::new();
        {
            let resolved = ctx.resolved();

            // every bitfield-typed parameter must declare a resolvable
            // bitfield group
            for command in &ctx.registry.commands {
                for param in &command.params {
                    if param.ty.text != "GLbitfield" {
                        continue;
                    }
                    let location = format!("{}.{}", command.name, param.name);
                    match &param.group {
                        None => diagnostics.push(
                            Diagnostic::warning(self.name(), "missing bitfield group")
                                .at(location),
                        ),
                        Some(group) if !resolved.is_bitfield_group(group) => diagnostics.push(
                            Diagnostic::warning(
                                self.name(),
                                format!("unresolved bitfield group '{group}'"),
                            )
                            .at(location),
                        ),
                        Some(_) => {}
                    }
                }
            }

            // group tags that resolved to nothing known
            for (group, owner) in &resolved.unresolved_groups {
                diagnostics.push(
                    Diagnostic::warning(self.name(), format!("unresolved group '{group}'"))
                        .at(owner.clone()),
                );
            }

            // extensions that contribute nothing to the entity set
            for extension in &ctx.registry.extensions {
                if extension.req_enums.is_empty() && extension.req_commands.is_empty() {
                    diagnostics.push(
                        Diagnostic::warning(self.name(), "extension requires nothing")
                            .at(extension.name.clone()),
                    );
                }
            }
        }

        for diagnostic in diagnostics {
            ctx.add_diagnostic(diagnostic);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use khrgen_ir::{ApiRegistry, Command, Enum, EnumKind, Group, Parameter, TypeDesc};

    use super::*;
    use crate::incore::IncoreTable;
    use crate::pipeline::phases::resolve_registry;

    fn run_verify(registry: ApiRegistry) -> Vec<Diagnostic> {
        let resolved = resolve_registry(&registry, &IncoreTable::default()).unwrap();
        let mut ctx = GenerationContext::new(registry);
        ctx.resolved = Some(resolved);
        VerifyPhase.run(&mut ctx).unwrap();
        ctx.diagnostics
    }

    fn bitfield_command(name: &str, group: Option<&str>) -> Command {
        Command {
            name: name.into(),
            return_type: TypeDesc::plain("void"),
            params: vec![Parameter {
                name: "mask".into(),
                ty: TypeDesc::plain("GLbitfield"),
                group: group.map(str::to_string),
            }],
        }
    }

    #[test]
    fn test_missing_bitfield_group() {
        let mut reg = ApiRegistry::new("gl");
        reg.commands.push(bitfield_command("glClear", None));

        let diags = run_verify(reg);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "missing bitfield group");
        assert_eq!(diags[0].location.as_deref(), Some("glClear.mask"));
    }

    #[test]
    fn test_unresolved_bitfield_group_on_param() {
        let mut reg = ApiRegistry::new("gl");
        reg.commands
            .push(bitfield_command("glClear", Some("UnknownMask")));

        let diags = run_verify(reg);

        assert!(
            diags
                .iter()
                .any(|d| d.message.contains("unresolved bitfield group 'UnknownMask'"))
        );
    }

    #[test]
    fn test_resolvable_group_passes() {
        let mut reg = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_A_BIT", "0x1".parse().unwrap(), EnumKind::Bitfield);
        e.group = Some("KnownMask".into());
        reg.enums.push(e);
        let mut group = Group::new("KnownMask");
        group.members.push("GL_A_BIT".into());
        reg.groups.push(group);
        reg.commands
            .push(bitfield_command("glUse", Some("KnownMask")));

        let diags = run_verify(reg);

        assert!(diags.is_empty());
    }

    #[test]
    fn test_unresolved_enum_group_single_diagnostic() {
        let mut reg = ApiRegistry::new("gl");
        let mut e = Enum::new("GL_LONE_BIT", "0x1".parse().unwrap(), EnumKind::Bitfield);
        e.group = Some("NowhereMask".into());
        reg.enums.push(e);
        let mut group = Group::new("NowhereMask");
        group.members.push("GL_LONE_BIT".into());
        reg.groups.push(group);

        let diags = run_verify(reg);

        let unresolved: Vec<_> = diags
            .iter()
            .filter(|d| d.message.contains("unresolved group"))
            .collect();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].location.as_deref(), Some("GL_LONE_BIT"));
    }

    #[test]
    fn test_empty_extension_reported() {
        let mut reg = ApiRegistry::new("gl");
        reg.extensions.push(khrgen_ir::Extension {
            name: "GL_ARB_empty".into(),
            apis: vec!["gl".into()],
            req_enums: Vec::new(),
            req_commands: Vec::new(),
        });

        let diags = run_verify(reg);

        assert!(diags.iter().any(|d| d.message == "extension requires nothing"));
    }
}
