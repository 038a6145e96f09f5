//! The resolved cross-reference graph.
//!
//! Resolution produces explicit immutable maps, constructed once per
//! pipeline run and passed by reference into renderers; "by name" lookups
//! are pure function parameters and nothing is mutated after the resolve
//! phase completes.

use indexmap::IndexMap;
use khrgen_core::Version;
use serde::Serialize;

/// Requirement/removal references for one enum or command.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SupportInfo {
    /// Versions of features requiring the entity, sorted ascending.
    pub req_features: Vec<Version>,
    /// Versions of features removing the entity, sorted ascending.
    /// Registry convention keeps at most one entry meaningful; the earliest
    /// always wins.
    pub rem_features: Vec<Version>,
    /// Names of extensions requiring the entity, sorted.
    pub req_extensions: Vec<String>,
}

impl SupportInfo {
    /// The earliest requiring feature version.
    pub fn first_required(&self) -> Option<Version> {
        self.req_features.first().copied()
    }

    /// The earliest removing feature version.
    pub fn first_removed(&self) -> Option<Version> {
        self.rem_features.first().copied()
    }

    /// Core-mode support test against a single feature version.
    fn supported_directly(&self, feature: Version, core: bool) -> bool {
        let Some(first_req) = self.first_required() else {
            return false;
        };
        if first_req > feature {
            return false;
        }
        if core {
            self.first_removed().is_none_or(|removed| removed > feature)
        } else {
            true
        }
    }
}

/// Immutable cross-reference maps for one resolved API.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedApi {
    /// Per-enum requirement references.
    pub enums: IndexMap<String, SupportInfo>,
    /// Per-command requirement references.
    pub commands: IndexMap<String, SupportInfo>,
    /// Enum name → resolved alias target (present in the same API).
    pub aliases: IndexMap<String, String>,
    /// Enum name → names of groups it belongs to, sorted.
    pub enum_groups: IndexMap<String, Vec<String>>,
    /// Group name → member enum names that resolved to live enums.
    pub group_members: IndexMap<String, Vec<String>>,
    /// Names of non-empty groups whose members are all of bitfield kind.
    pub bitfield_groups: Vec<String>,
    /// Extension name → feature version at which it folded into core.
    pub incore: IndexMap<String, Version>,
    /// (alias target, owning enum) pairs that did not resolve.
    pub unresolved_aliases: Vec<(String, String)>,
    /// (group tag, owning enum) pairs that did not resolve.
    pub unresolved_groups: Vec<(String, String)>,
}

impl ResolvedApi {
    /// Support test for an enum, following alias inheritance.
    ///
    /// `feature == None` means the unfiltered "all versions" artifact set;
    /// everything is supported there.
    pub fn enum_supported(&self, name: &str, feature: Option<Version>, core: bool) -> bool {
        let Some(feature) = feature else {
            return true;
        };
        let mut visited: Vec<&str> = Vec::new();
        self.enum_supported_walk(name, feature, core, &mut visited)
    }

    fn enum_supported_walk<'a>(
        &'a self,
        name: &'a str,
        feature: Version,
        core: bool,
        visited: &mut Vec<&'a str>,
    ) -> bool {
        if visited.iter().any(|v| *v == name) {
            // alias cycles are rejected at resolve time; this guard keeps
            // the walk bounded regardless
            return false;
        }
        visited.push(name);

        let Some(info) = self.enums.get(name) else {
            return false;
        };
        let alias_supported = match self.aliases.get(name) {
            Some(target) => self.enum_supported_walk(target, feature, core, visited),
            None => false,
        };
        if info.req_features.is_empty() {
            return alias_supported;
        }
        info.supported_directly(feature, core) || alias_supported
    }

    /// Support test for a command.
    pub fn command_supported(&self, name: &str, feature: Option<Version>, core: bool) -> bool {
        let Some(feature) = feature else {
            return true;
        };
        self.commands
            .get(name)
            .is_some_and(|info| info.supported_directly(feature, core))
    }

    /// Whether an enum is required by at least one extension.
    pub fn enum_in_extension(&self, name: &str) -> bool {
        self.enums
            .get(name)
            .is_some_and(|info| !info.req_extensions.is_empty())
    }

    /// Whether a command is required by at least one extension.
    pub fn command_in_extension(&self, name: &str) -> bool {
        self.commands
            .get(name)
            .is_some_and(|info| !info.req_extensions.is_empty())
    }

    /// Whether a group name denotes a known bitfield group.
    pub fn is_bitfield_group(&self, name: &str) -> bool {
        self.bitfield_groups.iter().any(|g| g == name)
    }
}
