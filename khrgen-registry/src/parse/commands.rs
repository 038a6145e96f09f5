//! `<commands>` parsing.

use std::collections::BTreeSet;

use khrgen_ir::{Command, Extension, Feature, Parameter, TypeDesc};

use super::{Filtering, api_matches, span_of};
use crate::error::{Result, SourceContext};
use crate::xml::{Element, Node};

/// Parameter names that collide with platform macros when emitted verbatim
/// (windef.h defines `near` and `far`). Suffixed to stay valid identifiers.
const COLLIDING_PARAM_NAMES: &[&str] = &["near", "far"];

fn sanitize_param_name(raw: &str) -> String {
    if COLLIDING_PARAM_NAMES.contains(&raw) {
        format!("{raw}Val")
    } else {
        raw.to_string()
    }
}

/// Split a `<proto>`/`<param>` element's mixed content into the type text
/// and the embedded `<name>` child.
fn split_prototype(el: &Element) -> (String, Option<String>) {
    let mut ty = String::new();
    let mut name = None;

    for node in &el.nodes {
        match node {
            Node::Text(t) => ty.push_str(t),
            Node::Element(e) if e.name == "ptype" => ty.push_str(&e.text()),
            Node::Element(e) if e.name == "name" => name = Some(e.text()),
            Node::Element(_) => {}
        }
    }

    (ty.trim().to_string(), name)
}

pub fn parse_commands(
    root: &Element,
    api: &str,
    features: &[Feature],
    extensions: &[Extension],
    ctx: &SourceContext,
    filtering: Filtering,
) -> Result<Vec<Command>> {
    // commands unreferenced by any feature or extension are dropped
    let mut required: BTreeSet<&str> = BTreeSet::new();
    for feature in features {
        required.extend(feature.req_commands.iter().map(String::as_str));
    }
    for extension in extensions {
        required.extend(extension.req_commands.iter().map(String::as_str));
    }

    let mut commands = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for section in root.children_named("commands") {
        for el in section.children_named("command") {
            if !api_matches(el, api) {
                continue;
            }

            let proto = el.first("proto").ok_or_else(|| {
                ctx.missing_element("proto", "a <command> element", span_of(el, ctx))
            })?;
            let (return_text, name) = split_prototype(proto);
            let name = name.ok_or_else(|| {
                ctx.missing_element("name", "a command <proto>", span_of(proto, ctx))
            })?;

            if filtering == Filtering::Referenced && !required.contains(name.as_str()) {
                continue;
            }
            if !seen.insert(name.clone()) {
                continue;
            }

            let mut params = Vec::new();
            for p in el.children_named("param") {
                let (param_text, param_name) = split_prototype(p);
                let param_name = param_name.ok_or_else(|| {
                    ctx.missing_element("name", "a command <param>", span_of(p, ctx))
                })?;
                params.push(Parameter {
                    name: sanitize_param_name(&param_name),
                    ty: TypeDesc::parse(&param_text),
                    group: p.attr("group").map(str::to_string),
                });
            }

            commands.push(Command {
                name,
                return_type: TypeDesc::parse(&return_text),
                params,
            });
        }
    }

    commands.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::super::testutil::registry_from;
    use super::*;

    fn gl_feature(req_commands: &[&str]) -> Feature {
        let mut f = Feature::new("gl", khrgen_core::Version::new(1, 0));
        f.req_commands = req_commands.iter().map(|s| s.to_string()).collect();
        f
    }

    #[test]
    fn test_parses_proto_and_params() {
        let (root, ctx) = registry_from(
            r#"
<registry>
    <commands>
        <command>
            <proto>void <name>glBufferData</name></proto>
            <param group="BufferTargetARB"><ptype>GLenum</ptype> <name>target</name></param>
            <param>const void *<name>data</name></param>
        </command>
    </commands>
</registry>
"#,
        );
        let commands = parse_commands(
            &root,
            "gl",
            &[gl_feature(&["glBufferData"])],
            &[],
            &ctx,
            Filtering::Referenced,
        )
        .unwrap();

        assert_eq!(commands.len(), 1);
        let cmd = &commands[0];
        assert_eq!(cmd.name, "glBufferData");
        assert!(cmd.return_type.is_void());
        assert_eq!(cmd.params.len(), 2);
        assert_eq!(cmd.params[0].name, "target");
        assert_eq!(cmd.params[0].ty.text, "GLenum");
        assert_eq!(cmd.params[0].group.as_deref(), Some("BufferTargetARB"));
        assert_eq!(cmd.params[1].ty.text, "const void *");
    }

    #[test]
    fn test_struct_prefix_stripped() {
        let (root, ctx) = registry_from(
            r#"
<registry>
    <commands>
        <command>
            <proto>struct _cl_event *<name>glCreateSyncFromCLeventARB</name></proto>
            <param>struct _cl_context *<name>context</name></param>
        </command>
    </commands>
</registry>
"#,
        );
        let commands = parse_commands(
            &root,
            "gl",
            &[gl_feature(&["glCreateSyncFromCLeventARB"])],
            &[],
            &ctx,
            Filtering::Referenced,
        )
        .unwrap();

        let cmd = &commands[0];
        assert!(cmd.return_type.is_struct);
        assert_eq!(cmd.return_type.text, "_cl_event *");
        assert!(cmd.params[0].ty.is_struct);
    }

    #[test]
    fn test_colliding_param_names_suffixed() {
        let (root, ctx) = registry_from(
            r#"
<registry>
    <commands>
        <command>
            <proto>void <name>glDepthRange</name></proto>
            <param><ptype>GLdouble</ptype> <name>near</name></param>
            <param><ptype>GLdouble</ptype> <name>far</name></param>
        </command>
    </commands>
</registry>
"#,
        );
        let commands = parse_commands(
            &root,
            "gl",
            &[gl_feature(&["glDepthRange"])],
            &[],
            &ctx,
            Filtering::Referenced,
        )
        .unwrap();

        assert_eq!(commands[0].params[0].name, "nearVal");
        assert_eq!(commands[0].params[1].name, "farVal");
    }

    #[test]
    fn test_missing_proto_is_fatal() {
        let (root, ctx) = registry_from(
            r#"<registry><commands><command/></commands></registry>"#,
        );
        let result = parse_commands(&root, "gl", &[], &[], &ctx, Filtering::All);
        assert!(result.is_err());
    }

    #[test]
    fn test_sorted_by_name() {
        let (root, ctx) = registry_from(
            r#"
<registry>
    <commands>
        <command><proto>void <name>glZzz</name></proto></command>
        <command><proto>void <name>glAaa</name></proto></command>
    </commands>
</registry>
"#,
        );
        let commands = parse_commands(
            &root,
            "gl",
            &[gl_feature(&["glZzz", "glAaa"])],
            &[],
            &ctx,
            Filtering::Referenced,
        )
        .unwrap();
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["glAaa", "glZzz"]);
    }
}
