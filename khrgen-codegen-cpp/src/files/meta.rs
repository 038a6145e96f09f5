//! The `Meta_*.cpp` lookup-table artifacts.
//!
//! Each table is a static map defined on the hand-written `Meta` class.
//! Value-keyed maps apply the same duplicate policy as the headers: one
//! active entry per value, further same-valued names as commented
//! cross-references.

use khrgen_codegen::{CodeBuilder, ResolvedApi};
use khrgen_ir::{ApiRegistry, Enum, EnumKind};

use super::{close_namespace, open_namespace, push_source_banner};

fn push_meta_prelude(b: &mut CodeBuilder, api: &str) {
    push_source_banner(b);
    b.push_line("#include <glapi/Meta.h>")
        .push_blank()
        .push_line(&format!("#include <glapi/{api}/gl.h>"))
        .push_blank();
    open_namespace(b, "glapi");
}

fn push_meta_close(b: &mut CodeBuilder) {
    close_namespace(b, "glapi");
}

/// Map member suffix for a scalar kind, e.g. "Enum" or "Boolean".
fn scalar_suffix(kind: &EnumKind) -> &'static str {
    match kind {
        EnumKind::Boolean => "Boolean",
        _ => "Enum",
    }
}

/// Lowercase the first character, for camel-case member names.
fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn open_map(b: &mut CodeBuilder, key: &str, value: &str, member: &str) {
    b.push_line(&format!(
        "const std::unordered_map<{key}, {value}> Meta::{member} ="
    ))
    .push_line("{")
    .push_indent();
}

fn close_map(b: &mut CodeBuilder) {
    b.push_dedent().push_line("};");
}

/// Enum-keyed name table (`Meta_StringsByEnum.cpp`, `Meta_StringsByBoolean.cpp`).
pub struct StringsByEnum<'a> {
    registry: &'a ApiRegistry,
    kind: EnumKind,
}

impl<'a> StringsByEnum<'a> {
    pub fn new(registry: &'a ApiRegistry, kind: EnumKind) -> Self {
        Self { registry, kind }
    }

    fn members(&self) -> Vec<&Enum> {
        self.registry
            .enums
            .iter()
            .filter(|e| e.kind == self.kind)
            .collect()
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ty = format!("{}::{}", api, self.kind.scalar_type());
        let member = format!("s_stringsBy{}", scalar_suffix(&self.kind));

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);
        open_map(&mut b, &ty, "std::string", &member);

        let mut canonical_by_value: Vec<(i128, &str)> = Vec::new();
        for e in self.members() {
            let line = format!("{{ {}::{}, \"{}\" }},", ty, e.name, e.name);
            match canonical_by_value
                .iter()
                .find(|(v, _)| *v == e.value.number)
            {
                Some((_, canonical)) => {
                    b.push_comment(&format!("{line} // reuse {canonical}"));
                }
                None => {
                    canonical_by_value.push((e.value.number, e.name.as_str()));
                    b.push_line(&line);
                }
            }
        }

        close_map(&mut b);
        push_meta_close(&mut b);
        b.build()
    }
}

/// String-keyed enum table (`Meta_EnumsByString.cpp`, `Meta_BooleansByString.cpp`).
pub struct EnumsByString<'a> {
    registry: &'a ApiRegistry,
    kind: EnumKind,
}

impl<'a> EnumsByString<'a> {
    pub fn new(registry: &'a ApiRegistry, kind: EnumKind) -> Self {
        Self { registry, kind }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ty = format!("{}::{}", api, self.kind.scalar_type());
        let member = format!("s_{}sByString", lower_first(scalar_suffix(&self.kind)));

        let mut members: Vec<&Enum> = self
            .registry
            .enums
            .iter()
            .filter(|e| e.kind == self.kind)
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);
        open_map(&mut b, "std::string", &ty, &member);
        for e in members {
            b.push_line(&format!("{{ \"{}\", {}::{} }},", e.name, ty, e.name));
        }
        close_map(&mut b);
        push_meta_close(&mut b);
        b.build()
    }
}

/// Per-group flags name tables (`Meta_StringsByBitfield.cpp`).
pub struct StringsByBitfield<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
}

impl<'a> StringsByBitfield<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi) -> Self {
        Self { registry, resolved }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);

        let mut first = true;
        for group in &self.resolved.bitfield_groups {
            if !first {
                b.push_blank();
            }
            first = false;

            let ty = format!("{api}::{group}");
            open_map(&mut b, &ty, "std::string", &format!("s_stringsBy{group}"));
            let mut canonical_by_value: Vec<(i128, &str)> = Vec::new();
            for name in &self.resolved.group_members[group] {
                let Some(e) = self.registry.enum_by_name(name) else {
                    continue;
                };
                let line = format!("{{ {}::{}, \"{}\" }},", ty, e.name, e.name);
                match canonical_by_value
                    .iter()
                    .find(|(v, _)| *v == e.value.number)
                {
                    Some((_, canonical)) => {
                        b.push_comment(&format!("{line} // reuse {canonical}"));
                    }
                    None => {
                        canonical_by_value.push((e.value.number, e.name.as_str()));
                        b.push_line(&line);
                    }
                }
            }
            close_map(&mut b);
        }

        push_meta_close(&mut b);
        b.build()
    }
}

/// Per-group reverse flags tables (`Meta_BitfieldsByString.cpp`).
pub struct BitfieldsByString<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
}

impl<'a> BitfieldsByString<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi) -> Self {
        Self { registry, resolved }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);

        let mut first = true;
        for group in &self.resolved.bitfield_groups {
            if !first {
                b.push_blank();
            }
            first = false;

            let ty = format!("{api}::{group}");
            let mut names: Vec<&String> = self.resolved.group_members[group].iter().collect();
            names.sort();

            open_map(
                &mut b,
                "std::string",
                &ty,
                &format!("s_{}ByString", lower_first(group)),
            );
            for name in names {
                b.push_line(&format!("{{ \"{name}\", {ty}::{name} }},"));
            }
            close_map(&mut b);
        }

        push_meta_close(&mut b);
        b.build()
    }
}

/// Extension name table (`Meta_StringsByExtension.cpp`).
pub struct StringsByExtension<'a> {
    registry: &'a ApiRegistry,
}

impl<'a> StringsByExtension<'a> {
    pub fn new(registry: &'a ApiRegistry) -> Self {
        Self { registry }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ty = format!("{api}::GLextension");

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);
        open_map(&mut b, &ty, "std::string", "s_stringsByExtension");
        for extension in &self.registry.extensions {
            b.push_line(&format!(
                "{{ {}::{}, \"{}\" }},",
                ty, extension.name, extension.name
            ));
        }
        close_map(&mut b);
        push_meta_close(&mut b);
        b.build()
    }
}

/// Reverse extension table (`Meta_ExtensionsByString.cpp`).
pub struct ExtensionsByString<'a> {
    registry: &'a ApiRegistry,
}

impl<'a> ExtensionsByString<'a> {
    pub fn new(registry: &'a ApiRegistry) -> Self {
        Self { registry }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ty = format!("{api}::GLextension");

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);
        open_map(&mut b, "std::string", &ty, "s_extensionsByString");
        for extension in &self.registry.extensions {
            b.push_line(&format!(
                "{{ \"{}\", {}::{} }},",
                extension.name, ty, extension.name
            ));
        }
        close_map(&mut b);
        push_meta_close(&mut b);
        b.build()
    }
}

/// Fold-in versions (`Meta_ReqVersionsByExtension.cpp`).
pub struct ReqVersionsByExtension<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
}

impl<'a> ReqVersionsByExtension<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi) -> Self {
        Self { registry, resolved }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ty = format!("{api}::GLextension");

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);
        open_map(&mut b, &ty, "Version", "s_reqVersionsByExtension");
        // extensions absent from the fold-in table are never core and
        // simply have no entry here
        for extension in &self.registry.extensions {
            if let Some(version) = self.resolved.incore.get(&extension.name) {
                b.push_line(&format!(
                    "{{ {}::{}, {{ {}, {} }} }},",
                    ty,
                    extension.name,
                    version.major(),
                    version.minor()
                ));
            }
        }
        close_map(&mut b);
        push_meta_close(&mut b);
        b.build()
    }
}

/// Required functions per extension (`Meta_FunctionStringsByExtension.cpp`).
pub struct FunctionStringsByExtension<'a> {
    registry: &'a ApiRegistry,
}

impl<'a> FunctionStringsByExtension<'a> {
    pub fn new(registry: &'a ApiRegistry) -> Self {
        Self { registry }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ty = format!("{api}::GLextension");

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);
        open_map(
            &mut b,
            &ty,
            "std::set<std::string>",
            "s_functionStringsByExtension",
        );
        for extension in &self.registry.extensions {
            if extension.req_commands.is_empty() {
                continue;
            }
            let mut commands = extension.req_commands.clone();
            commands.sort();
            let list = commands
                .iter()
                .map(|c| format!("\"{c}\""))
                .collect::<Vec<_>>()
                .join(", ");
            b.push_line(&format!("{{ {}::{}, {{ {} }} }},", ty, extension.name, list));
        }
        close_map(&mut b);
        push_meta_close(&mut b);
        b.build()
    }
}

/// Requiring extensions per function (`Meta_ExtensionsByFunctionString.cpp`).
pub struct ExtensionsByFunctionString<'a> {
    registry: &'a ApiRegistry,
    resolved: &'a ResolvedApi,
}

impl<'a> ExtensionsByFunctionString<'a> {
    pub fn new(registry: &'a ApiRegistry, resolved: &'a ResolvedApi) -> Self {
        Self { registry, resolved }
    }

    pub fn render(&self) -> String {
        let api = &self.registry.api;
        let ty = format!("{api}::GLextension");

        let mut b = CodeBuilder::cpp();
        push_meta_prelude(&mut b, api);
        open_map(
            &mut b,
            "std::string",
            &format!("std::set<{ty}>"),
            "s_extensionsByFunctionString",
        );
        for command in &self.registry.commands {
            let Some(info) = self.resolved.commands.get(&command.name) else {
                continue;
            };
            if info.req_extensions.is_empty() {
                continue;
            }
            let list = info
                .req_extensions
                .iter()
                .map(|e| format!("{ty}::{e}"))
                .collect::<Vec<_>>()
                .join(", ");
            b.push_line(&format!("{{ \"{}\", {{ {} }} }},", command.name, list));
        }
        close_map(&mut b);
        push_meta_close(&mut b);
        b.build()
    }
}
