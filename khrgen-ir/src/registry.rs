//! Parsed registry entities.
//!
//! All records here are plain data filled in by the parser. Cross-references
//! (which features require which entities, group membership, alias targets)
//! are resolved later into immutable lookup maps; the records themselves are
//! never mutated after parsing, except by the additive patch overlay.

use khrgen_core::Version;
use serde::Serialize;

use crate::{Enum, TypeDesc};

/// One numbered API version (e.g. "GL 4.3") with its requirement lists.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub api: String,
    pub version: Version,
    pub req_enums: Vec<String>,
    pub req_commands: Vec<String>,
    pub rem_enums: Vec<String>,
    pub rem_commands: Vec<String>,
}

impl Feature {
    pub fn new(api: impl Into<String>, version: Version) -> Self {
        Self {
            api: api.into(),
            version,
            req_enums: Vec::new(),
            req_commands: Vec::new(),
            rem_enums: Vec::new(),
            rem_commands: Vec::new(),
        }
    }

    /// Name form used in registry documents, e.g. "GL_VERSION_4_3".
    pub fn registry_name(&self) -> String {
        format!(
            "{}_VERSION_{}_{}",
            self.api.to_uppercase(),
            self.version.major(),
            self.version.minor()
        )
    }
}

/// A named, optional capability bundle outside core versioned features.
#[derive(Debug, Clone, Serialize)]
pub struct Extension {
    pub name: String,
    /// API tags from the pipe-delimited `supported` attribute.
    pub apis: Vec<String>,
    pub req_enums: Vec<String>,
    pub req_commands: Vec<String>,
}

impl Extension {
    pub fn supports(&self, api: &str) -> bool {
        self.apis.iter().any(|a| a == api)
    }
}

/// One function of the API.
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    pub name: String,
    pub return_type: TypeDesc,
    pub params: Vec<Parameter>,
}

impl Command {
    /// The command name without its API prefix, used for binding members
    /// (e.g. "glBindBuffer" → "BindBuffer").
    pub fn member_name(&self) -> &str {
        self.name.strip_prefix("gl").unwrap_or(&self.name)
    }
}

/// A single command parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeDesc,
    /// Group tag used to select a flags type in generated signatures.
    pub group: Option<String>,
}

/// A named collection of enum constants.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub name: String,
    /// Member enum names as listed in the registry (resolved later).
    pub members: Vec<String>,
    /// Whether the group was defined in the groups section, as opposed to
    /// being inferred from an enum's group tag.
    pub explicit: bool,
}

impl Group {
    /// Create an implicit group, inferred from an enum's group tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            explicit: false,
        }
    }

    /// Create an explicitly defined group.
    pub fn explicit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            explicit: true,
        }
    }
}

/// A raw typedef/struct declaration required to compile generated headers.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDef {
    pub name: String,
    /// The full declaration line(s), passed through to the types header.
    pub decl: String,
}

/// The complete parsed entity set for one target API.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRegistry {
    /// The target API identifier (e.g. "gl").
    pub api: String,
    /// Features sorted by version.
    pub features: Vec<Feature>,
    /// Extensions supporting the target API, sorted by name.
    pub extensions: Vec<Extension>,
    /// Commands sorted by name.
    pub commands: Vec<Command>,
    /// Enums sorted by (value, name).
    pub enums: Vec<Enum>,
    /// Groups sorted by name, explicit and implicit.
    pub groups: Vec<Group>,
    /// Typedefs in registry order.
    pub types: Vec<TypeDef>,
}

impl ApiRegistry {
    pub fn new(api: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            features: Vec::new(),
            extensions: Vec::new(),
            commands: Vec::new(),
            enums: Vec::new(),
            groups: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn feature(&self, version: Version) -> Option<&Feature> {
        self.features.iter().find(|f| f.version == version)
    }

    pub fn enum_by_name(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn command_by_name(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }
}
