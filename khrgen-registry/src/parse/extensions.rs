//! `<extensions>` parsing.

use khrgen_ir::Extension;

use super::{api_matches, name_attr};
use crate::error::{Result, SourceContext};
use crate::xml::Element;

pub fn parse_extensions(root: &Element, api: &str, ctx: &SourceContext) -> Result<Vec<Extension>> {
    let mut extensions = Vec::new();

    for section in root.children_named("extensions") {
        for el in section.children_named("extension") {
            let name = name_attr(el, "an <extension> element", ctx)?;

            let apis: Vec<String> = el
                .attr("supported")
                .map(|s| s.split('|').map(str::to_string).collect())
                .unwrap_or_default();
            if !apis.is_empty() && !apis.iter().any(|a| a == api) {
                continue;
            }

            let mut extension = Extension {
                name,
                apis,
                req_enums: Vec::new(),
                req_commands: Vec::new(),
            };

            // require lists are api-filtered here, per the loader contract
            for req in el.children_named("require") {
                if !api_matches(req, api) {
                    continue;
                }
                for e in req.children_named("enum") {
                    extension
                        .req_enums
                        .push(name_attr(e, "a <require> entry", ctx)?);
                }
                for c in req.children_named("command") {
                    extension
                        .req_commands
                        .push(name_attr(c, "a <require> entry", ctx)?);
                }
            }

            extensions.push(extension);
        }
    }

    extensions.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(extensions)
}
