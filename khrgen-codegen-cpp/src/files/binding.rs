//! The binding-object artifacts: `Binding.h` and `Binding_objects.cpp`.
//!
//! Every API function is backed by one static function object; the class
//! declares them all, the objects file defines them and the lookup list.

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::{ApiRegistry, Command};

use super::functions::param_type;
use super::{close_namespace, open_namespace, push_banner, push_source_banner};

/// Qualify a generated type with its API namespace; builtin `void` stays as
/// is, `const` prefixes are preserved.
fn namespacify(ty: &str, api: &str) -> String {
    if ty.starts_with("void") || ty.contains(" void") {
        return ty.to_string();
    }
    match ty.strip_prefix("const ") {
        Some(rest) => format!("const {api}::{rest}"),
        None => format!("{api}::{ty}"),
    }
}

fn function_template_args(resolved: &ResolvedApi, command: &Command, api: &str) -> String {
    let mut args = vec![namespacify(&command.return_type.to_string(), api)];
    for param in &command.params {
        args.push(namespacify(&param_type(resolved, param), api));
    }
    args.join(", ")
}

pub struct BindingHeader<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
}

impl<'a> BindingHeader<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi) -> Self {
        Self { registry, resolved }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;

        let mut b = CodeBuilder::cpp();
        push_banner(&mut b);
        b.push_line("#include <array>")
            .push_blank()
            .push_line("#include <glapi/glapi_api.h>")
            .push_line("#include <glapi/Function.h>")
            .push_line(&format!("#include <glapi/{api}/gl.h>"))
            .push_blank();
        open_namespace(&mut b, "glapi");

        b.push_line("class GLAPI_API Binding")
            .push_line("{")
            .push_line("public:")
            .push_indent()
            .push_line(&format!(
                "static const unsigned int s_functionCount = {};",
                self.registry.commands.len()
            ))
            .push_blank()
            .push_line(&format!(
                "static const std::array<AbstractFunction *, {}> s_functions;",
                self.registry.commands.len()
            ))
            .push_blank();

        for command in &self.registry.commands {
            b.push_line(&format!(
                "static Function<{}> {};",
                function_template_args(self.resolved, command, api),
                command.member_name()
            ));
        }

        b.push_dedent().push_line("};");
        close_namespace(&mut b, "glapi");
        b.build()
    }
}

pub struct BindingObjects<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
}

impl<'a> BindingObjects<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi) -> Self {
        Self { registry, resolved }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;

        let mut b = CodeBuilder::cpp();
        push_source_banner(&mut b);
        b.push_line("#include <glapi/Binding.h>").push_blank();
        open_namespace(&mut b, "glapi");

        for command in &self.registry.commands {
            b.push_line(&format!(
                "Function<{}> Binding::{}(\"{}\");",
                function_template_args(self.resolved, command, api),
                command.member_name(),
                command.name
            ));
        }

        b.push_blank()
            .push_line(&format!(
                "const std::array<AbstractFunction *, {}> Binding::s_functions =",
                self.registry.commands.len()
            ))
            .push_line("{{")
            .push_indent();
        for command in &self.registry.commands {
            b.push_line(&format!("&Binding::{},", command.member_name()));
        }
        b.push_dedent().push_line("}};");

        close_namespace(&mut b, "glapi");
        b.build()
    }
}
