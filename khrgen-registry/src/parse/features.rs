//! `<feature>` parsing.

use khrgen_core::Version;
use khrgen_ir::Feature;

use super::{api_matches, name_attr, span_of};
use crate::error::{Result, SourceContext};
use crate::xml::Element;

pub fn parse_features(root: &Element, api: &str, ctx: &SourceContext) -> Result<Vec<Feature>> {
    let mut features = Vec::new();

    for el in root.children_named("feature") {
        if !api_matches(el, api) {
            continue;
        }

        let number = el.attr("number").ok_or_else(|| {
            ctx.missing_attribute("number", "a <feature> element", span_of(el, ctx))
        })?;
        let version: Version = number
            .parse()
            .map_err(|e: String| ctx.invalid_value(e, span_of(el, ctx)))?;

        let mut feature = Feature::new(api, version);

        for req in el.children_named("require") {
            if !api_matches(req, api) {
                continue;
            }
            for e in req.children_named("enum") {
                feature
                    .req_enums
                    .push(name_attr(e, "a <require> entry", ctx)?);
            }
            for c in req.children_named("command") {
                feature
                    .req_commands
                    .push(name_attr(c, "a <require> entry", ctx)?);
            }
        }

        for rem in el.children_named("remove") {
            if !api_matches(rem, api) {
                continue;
            }
            for e in rem.children_named("enum") {
                feature
                    .rem_enums
                    .push(name_attr(e, "a <remove> entry", ctx)?);
            }
            for c in rem.children_named("command") {
                feature
                    .rem_commands
                    .push(name_attr(c, "a <remove> entry", ctx)?);
            }
        }

        features.push(feature);
    }

    features.sort_by_key(|f| f.version);
    Ok(features)
}
