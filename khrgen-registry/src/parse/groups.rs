//! `<groups>` parsing, including implicit groups declared by enum tags.

use khrgen_ir::{Enum, Group};

use super::name_attr;
use crate::error::{Result, SourceContext};
use crate::xml::Element;

pub fn parse_groups(root: &Element, enums: &[Enum], ctx: &SourceContext) -> Result<Vec<Group>> {
    let mut groups: Vec<Group> = Vec::new();

    for section in root.children_named("groups") {
        for el in section.children_named("group") {
            let mut group = Group::explicit(name_attr(el, "a <group> element", ctx)?);
            for member in el.children_named("enum") {
                group.members.push(name_attr(member, "a group <enum> entry", ctx)?);
            }
            groups.push(group);
        }
    }

    // groups not listed in the groups section can be implicitly
    // specified by enums
    for e in enums {
        add_implicit_member(&mut groups, e);
    }

    groups.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(groups)
}

/// Register an enum's group tag, creating the group when it is not
/// explicitly defined. The enum's own name always joins the member list.
pub fn add_implicit_member(groups: &mut Vec<Group>, e: &Enum) {
    let Some(tag) = &e.group else {
        return;
    };

    match groups.iter_mut().find(|g| g.name == *tag) {
        Some(group) => {
            if !group.members.contains(&e.name) {
                group.members.push(e.name.clone());
            }
        }
        None => {
            let mut group = Group::new(tag.clone());
            group.members.push(e.name.clone());
            groups.push(group);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::registry_from;
    use super::*;
    use khrgen_ir::EnumKind;

    fn bitfield_enum(name: &str, value: &str, group: &str) -> Enum {
        let mut e = Enum::new(name, value.parse().unwrap(), EnumKind::Bitfield);
        e.group = Some(group.to_string());
        e
    }

    #[test]
    fn test_explicit_groups() {
        let (root, ctx) = registry_from(
            r#"
<registry>
    <groups>
        <group name="Boolean">
            <enum name="GL_FALSE"/>
            <enum name="GL_TRUE"/>
        </group>
    </groups>
</registry>
"#,
        );
        let groups = parse_groups(&root, &[], &ctx).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Boolean");
        assert_eq!(groups[0].members, vec!["GL_FALSE", "GL_TRUE"]);
    }

    #[test]
    fn test_implicit_group_from_enum_tag() {
        let (root, ctx) = registry_from("<registry/>");
        let enums = vec![bitfield_enum("GL_MAP_READ_BIT", "0x1", "MapBufferAccessMask")];
        let groups = parse_groups(&root, &enums, &ctx).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "MapBufferAccessMask");
        assert_eq!(groups[0].members, vec!["GL_MAP_READ_BIT"]);
    }

    #[test]
    fn test_enum_tag_joins_explicit_group() {
        let (root, ctx) = registry_from(
            r#"
<registry>
    <groups>
        <group name="AttribMask">
            <enum name="GL_CURRENT_BIT"/>
        </group>
    </groups>
</registry>
"#,
        );
        let enums = vec![bitfield_enum("GL_DEPTH_BUFFER_BIT", "0x100", "AttribMask")];
        let groups = parse_groups(&root, &enums, &ctx).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].members,
            vec!["GL_CURRENT_BIT", "GL_DEPTH_BUFFER_BIT"]
        );
    }

    #[test]
    fn test_sorted_by_name() {
        let (root, ctx) = registry_from(
            r#"
<registry>
    <groups>
        <group name="Zeta"/>
        <group name="Alpha"/>
    </groups>
</registry>
"#,
        );
        let groups = parse_groups(&root, &[], &ctx).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }
}
