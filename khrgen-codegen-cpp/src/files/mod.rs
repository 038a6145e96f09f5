//! Artifact renderers.
//!
//! Every renderer is a pure function from (entity subset, subtree) to text;
//! writing happens elsewhere. Shared output conventions live here.

mod binding;
mod bitfields;
mod booleans;
mod enums;
mod extensions;
mod functions;
mod meta;
mod revision;
mod types;
mod umbrella;
mod values;
mod versions;

use std::collections::BTreeSet;

pub use binding::{BindingHeader, BindingObjects};
pub use bitfields::BitfieldHeader;
pub use booleans::BooleanHeader;
pub use enums::EnumHeader;
pub use extensions::ExtensionHeader;
pub use functions::{FunctionImplementations, FunctionsHeader};
pub use meta::{
    BitfieldsByString, EnumsByString, ExtensionsByFunctionString, ExtensionsByString,
    FunctionStringsByExtension, ReqVersionsByExtension, StringsByBitfield, StringsByEnum,
    StringsByExtension,
};
pub use revision::RevisionHeader;
pub use types::TypesHeader;
pub use umbrella::UmbrellaHeader;
pub use values::ValuesHeader;
pub use versions::ValidVersions;

use khrgen_codegen::CodeBuilder;
use khrgen_ir::Enum;

/// Standard banner for every generated file.
pub(crate) fn push_banner(b: &mut CodeBuilder) {
    b.push_line("#pragma once")
        .push_blank()
        .push_comment("This file is part of the glapi binding library.")
        .push_comment("Generated from the Khronos API registry; do not edit directly.")
        .push_blank();
}

/// Banner variant for .cpp files (no include guard).
pub(crate) fn push_source_banner(b: &mut CodeBuilder) {
    b.push_comment("This file is part of the glapi binding library.")
        .push_comment("Generated from the Khronos API registry; do not edit directly.")
        .push_blank();
}

pub(crate) fn open_namespace(b: &mut CodeBuilder, ns: &str) {
    b.push_line(&format!("namespace {ns}"))
        .push_line("{")
        .push_blank();
}

pub(crate) fn close_namespace(b: &mut CodeBuilder, ns: &str) {
    b.push_blank()
        .push_line(&format!("}} // namespace {ns}"));
}

/// Render one block of enum constants, annotating duplicates.
///
/// Within the block, the first name carrying a value is the canonical
/// definition; every other name sharing that value renders as a commented
/// cross-reference. Names already defined by an earlier block of the same
/// artifact render as commented reuse lines as well, so a constant is never
/// actively defined twice.
pub(crate) fn push_enum_members(
    b: &mut CodeBuilder,
    members: &[&Enum],
    seen_names: &mut BTreeSet<String>,
) {
    let mut canonical_by_value: Vec<(i128, &str)> = Vec::new();

    for e in members {
        let line = format!("{} = {},", e.name, e.value.literal);
        if seen_names.contains(&e.name) {
            b.push_comment(&format!("{line} // reuse"));
            continue;
        }
        match canonical_by_value
            .iter()
            .find(|(v, _)| *v == e.value.number)
        {
            Some((_, canonical)) => {
                b.push_comment(&format!("{line} // reuse {canonical}"));
            }
            None => {
                canonical_by_value.push((e.value.number, e.name.as_str()));
                seen_names.insert(e.name.clone());
                b.push_line(&line);
            }
        }
    }
}
