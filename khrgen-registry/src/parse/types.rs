//! `<types>` parsing.

use khrgen_ir::TypeDef;

use super::{api_matches, span_of};
use crate::error::{Result, SourceContext};
use crate::xml::Element;

pub fn parse_types(root: &Element, api: &str, ctx: &SourceContext) -> Result<Vec<TypeDef>> {
    let mut types = Vec::new();

    for section in root.children_named("types") {
        for el in section.children_named("type") {
            if !api_matches(el, api) {
                continue;
            }

            let name = match el.attr("name") {
                Some(n) => n.to_string(),
                None => el
                    .first("name")
                    .map(|n| n.text())
                    .ok_or_else(|| {
                        ctx.missing_element("name", "a <type> element", span_of(el, ctx))
                    })?,
            };

            let decl = normalize_decl(&el.text());
            if decl.is_empty() {
                // pure references (e.g. khrplatform includes) carry no
                // declaration text and nothing to emit
                continue;
            }

            types.push(TypeDef { name, decl });
        }
    }

    Ok(types)
}

/// Normalize multi-line declarations: strip trailing whitespace per line and
/// re-anchor continuation lines so the name positioning of C-style typedefs
/// survives re-emission.
fn normalize_decl(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    if lines.len() <= 1 {
        return raw.trim().to_string();
    }

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let line = if i == 0 { line.trim_start() } else { line };
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}
