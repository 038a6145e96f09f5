//! Element → entity mapping.
//!
//! Each submodule converts one registry section into its typed records,
//! applying the uniform api filter: an element is kept only if it has no
//! `api` attribute or that attribute equals the requested API identifier.

mod commands;
mod enums;
mod extensions;
mod features;
pub(crate) mod groups;
mod types;

use khrgen_ir::ApiRegistry;
use miette::SourceSpan;

use crate::error::{Result, SourceContext};
use crate::xml::Element;

/// How aggressively unreferenced entities are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filtering {
    /// Drop enums/commands unreferenced by any feature, extension, or used
    /// group. This is the completeness policy for the base registry.
    Referenced,
    /// Keep everything. Patch documents are hand-authored corrections whose
    /// entities may not be referenced by the base requirement lists.
    All,
}

/// Parse the base registry for one target API.
pub fn parse_api(root: &Element, api: &str, ctx: &SourceContext) -> Result<ApiRegistry> {
    parse_with(root, api, ctx, Filtering::Referenced)
}

/// Parse a patch document for one target API, keeping all entities.
pub fn parse_patch(root: &Element, api: &str, ctx: &SourceContext) -> Result<ApiRegistry> {
    parse_with(root, api, ctx, Filtering::All)
}

fn parse_with(
    root: &Element,
    api: &str,
    ctx: &SourceContext,
    filtering: Filtering,
) -> Result<ApiRegistry> {
    let features = features::parse_features(root, api, ctx)?;
    let types = types::parse_types(root, api, ctx)?;
    let extensions = extensions::parse_extensions(root, api, ctx)?;
    let commands = commands::parse_commands(root, api, &features, &extensions, ctx, filtering)?;
    let enums = enums::parse_enums(
        root,
        api,
        &features,
        &extensions,
        &commands,
        ctx,
        filtering,
    )?;
    let groups = groups::parse_groups(root, &enums, ctx)?;

    Ok(ApiRegistry {
        api: api.to_string(),
        features,
        extensions,
        commands,
        enums,
        groups,
        types,
    })
}

/// The uniform api filter from the loader contract.
fn api_matches(el: &Element, api: &str) -> bool {
    el.attr("api").is_none_or(|a| a == api)
}

/// Span of an element's start tag for error labels.
fn span_of(el: &Element, ctx: &SourceContext) -> Option<SourceSpan> {
    Some(ctx.span_at(el.position.0, el.position.1))
}

/// Required `name` attribute, fatal when absent.
fn name_attr(el: &Element, context: &str, ctx: &SourceContext) -> Result<String> {
    el.attr("name")
        .map(str::to_string)
        .ok_or_else(|| ctx.missing_attribute("name", context, span_of(el, ctx)))
}
