//! `<enums>` parsing.

use std::collections::BTreeSet;

use khrgen_ir::{Command, Enum, EnumKind, EnumValue, Extension, Feature};

use super::{Filtering, api_matches, name_attr, span_of};
use crate::error::{Result, SourceContext};
use crate::xml::Element;

/// Block group that holds special numbers rather than symbolic constants.
const SPECIAL_NUMBERS: &str = "SpecialNumbers";

/// Registry comment prefix marking values that are not part of the API.
const NOT_AN_API_ENUM: &str = "Not an API enum.";

fn special_kind(name: &str, type_attr: Option<&str>) -> EnumKind {
    if name == "GL_TRUE" || name == "GL_FALSE" {
        return EnumKind::Boolean;
    }
    let ty = match type_attr {
        Some("u") => "GLuint",
        Some("ull") => "GLuint64",
        _ => "GLenum",
    };
    EnumKind::Special(ty.to_string())
}

pub fn parse_enums(
    root: &Element,
    api: &str,
    features: &[Feature],
    extensions: &[Extension],
    commands: &[Command],
    ctx: &SourceContext,
    filtering: Filtering,
) -> Result<Vec<Enum>> {
    // groups referenced by at least one command parameter
    let mut groups_used: BTreeSet<&str> = BTreeSet::new();
    for command in commands {
        for param in &command.params {
            if let Some(group) = &param.group {
                groups_used.insert(group.as_str());
            }
        }
    }

    // enums referenced by at least one feature or extension
    let mut required: BTreeSet<&str> = BTreeSet::new();
    for feature in features {
        required.extend(feature.req_enums.iter().map(String::as_str));
    }
    for extension in extensions {
        required.extend(extension.req_enums.iter().map(String::as_str));
    }

    let mut enums = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for block in root.children_named("enums") {
        let block_group = block.attr("group");
        let block_is_bitmask = block.attr("type") == Some("bitmask");

        for el in block.children_named("enum") {
            if matches!(el.attr("comment"), Some(c) if c.starts_with(NOT_AN_API_ENUM)) {
                continue;
            }

            let name = name_attr(el, "an <enum> element", ctx)?;

            let group_is_used = matches!(block_group, Some(g) if groups_used.contains(g));
            if filtering == Filtering::Referenced
                && !required.contains(name.as_str())
                && !group_is_used
            {
                continue;
            }
            if !api_matches(el, api) {
                continue;
            }
            if !seen.insert(name.clone()) {
                continue;
            }

            let value_literal = el.attr("value").ok_or_else(|| {
                ctx.missing_attribute("value", "an <enum> element", span_of(el, ctx))
            })?;
            let value: EnumValue = value_literal
                .parse()
                .map_err(|e: String| ctx.invalid_value(e, span_of(el, ctx)))?;

            let mut entry = if block_group == Some(SPECIAL_NUMBERS) {
                Enum::new(name, value, special_kind_of(el))
            } else if block_is_bitmask {
                let mut e = Enum::new(name, value, EnumKind::Bitfield);
                e.group = block_group.map(str::to_string);
                e
            } else {
                Enum::new(name, value, EnumKind::Enum)
            };
            entry.alias = el.attr("alias").map(str::to_string);

            enums.push(entry);
        }
    }

    enums.sort();
    Ok(enums)
}

fn special_kind_of(el: &Element) -> EnumKind {
    special_kind(el.attr("name").unwrap_or_default(), el.attr("type"))
}
