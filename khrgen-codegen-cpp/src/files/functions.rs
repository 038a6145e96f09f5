//! The `functions.h` / `functions.cpp` artifacts.

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::{ApiRegistry, Command};

use super::{close_namespace, open_namespace, push_banner, push_source_banner};
use crate::Subtree;

/// Parameter type in a generated signature: bitfield parameters use their
/// flags type when the group resolves to a known bitfield group, and the
/// generic GLbitfield otherwise.
pub(crate) fn param_type(resolved: &ResolvedApi, param: &khrgen_ir::Parameter) -> String {
    if param.ty.text == "GLbitfield"
        && let Some(group) = &param.group
        && resolved.is_bitfield_group(group)
    {
        return group.clone();
    }
    param.ty.to_string()
}

pub(crate) fn signature_params(resolved: &ResolvedApi, command: &Command) -> String {
    command
        .params
        .iter()
        .map(|p| format!("{} {}", param_type(resolved, p), p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn call_args(command: &Command) -> String {
    command
        .params
        .iter()
        .map(|p| p.name.clone())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct FunctionsHeader<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
    subtree: Subtree,
}

impl<'a> FunctionsHeader<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi, subtree: Subtree) -> Self {
        Self {
            registry,
            resolved,
            subtree,
        }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ns = self.subtree.namespace(api);

        let selected: Vec<&Command> = self
            .registry
            .commands
            .iter()
            .filter(|c| self.subtree.selects_command(self.resolved, &c.name))
            .collect();

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);

        if self.subtree.feature.is_none() {
            b.push_line("#include <glapi/glapi_api.h>")
                .push_blank()
                .push_line(&format!("#include <glapi/{api}/types.h>"))
                .push_line(&format!("#include <glapi/{api}/enum.h>"))
                .push_line(&format!("#include <glapi/{api}/bitfield.h>"))
                .push_line(&format!("#include <glapi/{api}/boolean.h>"))
                .push_blank();
            open_namespace(&mut b, &ns);
            for command in &selected {
                b.push_line(&format!(
                    "GLAPI_API {} {}({});",
                    command.return_type,
                    command.name,
                    signature_params(self.resolved, command)
                ));
            }
        } else {
            // featured subtrees re-export from the master namespace
            b.push_line(&format!("#include <glapi/{api}/functions.h>"))
                .push_blank();
            open_namespace(&mut b, &ns);
            for command in &selected {
                b.push_line(&format!("using {}::{};", api, command.name));
            }
        }

        close_namespace(&mut b, &ns);
        b.build()
    }
}

/// Implementations forwarding every function to its binding object.
pub struct FunctionImplementations<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
}

impl<'a> FunctionImplementations<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi) -> Self {
        Self { registry, resolved }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;

        let mut b = CodeBuilder::cpp();
        push_source_banner(&mut b);
        b.push_line(&format!("#include <glapi/{api}/functions.h>"))
            .push_blank()
            .push_line("#include <glapi/Binding.h>")
            .push_blank();
        open_namespace(&mut b, api);

        let mut first = true;
        for command in &self.registry.commands {
            if !first {
                b.push_blank();
            }
            first = false;
            b.push_line(&format!(
                "{} {}({})",
                command.return_type,
                command.name,
                signature_params(self.resolved, command)
            ))
            .push_line("{")
            .push_indent()
            .push_line(&format!(
                "return glapi::Binding::{}({});",
                command.member_name(),
                call_args(command)
            ))
            .push_dedent()
            .push_line("}");
        }

        close_namespace(&mut b, api);
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use khrgen_codegen::SupportInfo;
    use khrgen_core::Version;
    use khrgen_ir::{Parameter, TypeDesc};

    use super::*;
    use crate::Profile;

    fn registry_with_command() -> (ApiRegistry, ResolvedApi) {
        let mut reg = ApiRegistry::new("gl");
        reg.commands.push(Command {
            name: "glBufferData".into(),
            return_type: TypeDesc::plain("void"),
            params: vec![
                Parameter {
                    name: "target".into(),
                    ty: TypeDesc::plain("GLenum"),
                    group: None,
                },
                Parameter {
                    name: "access".into(),
                    ty: TypeDesc::plain("GLbitfield"),
                    group: Some("MapBufferAccessMask".into()),
                },
            ],
        });

        let mut resolved = ResolvedApi::default();
        resolved.commands.insert(
            "glBufferData".into(),
            SupportInfo {
                req_features: vec![Version::new(1, 5)],
                rem_features: Vec::new(),
                req_extensions: Vec::new(),
            },
        );
        resolved.bitfield_groups = vec!["MapBufferAccessMask".into()];
        (reg, resolved)
    }

    #[test]
    fn test_declaration_uses_flags_type() {
        let (reg, resolved) = registry_with_command();
        let header = FunctionsHeader::new(&reg, &resolved, Subtree::all()).render();

        assert!(header.contains(
            "GLAPI_API void glBufferData(GLenum target, MapBufferAccessMask access);"
        ));
    }

    #[test]
    fn test_unresolved_group_falls_back_to_generic_type() {
        let (reg, mut resolved) = registry_with_command();
        resolved.bitfield_groups.clear();
        let header = FunctionsHeader::new(&reg, &resolved, Subtree::all()).render();

        assert!(header.contains("GLbitfield access"));
        assert!(!header.contains("MapBufferAccessMask access"));
    }

    #[test]
    fn test_featured_header_reexports() {
        let (reg, resolved) = registry_with_command();
        let subtree = Subtree::new(Version::new(2, 0), Profile::Compat);
        let header = FunctionsHeader::new(&reg, &resolved, subtree).render();

        assert!(header.contains("namespace gl20"));
        assert!(header.contains("using gl::glBufferData;"));
    }

    #[test]
    fn test_featured_header_drops_unsupported() {
        let (reg, resolved) = registry_with_command();
        let subtree = Subtree::new(Version::new(1, 0), Profile::Compat);
        let header = FunctionsHeader::new(&reg, &resolved, subtree).render();

        assert!(!header.contains("glBufferData"));
    }

    #[test]
    fn test_implementation_forwards_to_binding() {
        let (reg, resolved) = registry_with_command();
        let source = FunctionImplementations::new(&reg, &resolved).render();

        assert!(source.contains("void glBufferData(GLenum target, MapBufferAccessMask access)"));
        assert!(source.contains("return glapi::Binding::BufferData(target, access);"));
    }
}
