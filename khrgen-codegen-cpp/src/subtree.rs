//! Output subtrees: one per (feature version × profile) combination.

use khrgen_codegen::ResolvedApi;
use khrgen_core::Version;

/// First version with a core profile; core subtrees start here.
pub const FIRST_CORE_VERSION: Version = Version::new(3, 2);

/// Emission profile of a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Compatibility: removed entities are retained.
    Compat,
    /// Core: entities removed at or before the feature version are excluded.
    Core,
    /// Extension-forward: entities not in the plain feature set but
    /// required by at least one extension.
    Ext,
}

impl Profile {
    fn dir_suffix(&self) -> &'static str {
        match self {
            Profile::Compat => "",
            Profile::Core => "core",
            Profile::Ext => "ext",
        }
    }
}

/// One output subtree of the generated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subtree {
    /// Feature version filter; `None` is the unfiltered "all versions" tree.
    pub feature: Option<Version>,
    pub profile: Profile,
}

impl Subtree {
    /// The unfiltered tree holding every parsed entity.
    pub fn all() -> Self {
        Self {
            feature: None,
            profile: Profile::Compat,
        }
    }

    pub fn new(feature: Version, profile: Profile) -> Self {
        Self {
            feature: Some(feature),
            profile,
        }
    }

    /// C++ namespace and directory name, e.g. "gl", "gl43", "gl43core".
    pub fn namespace(&self, api: &str) -> String {
        match self.feature {
            None => api.to_string(),
            Some(version) => format!("{}{}{}", api, version.suffix(), self.profile.dir_suffix()),
        }
    }

    /// Whether an enum belongs to this subtree.
    pub fn selects_enum(&self, resolved: &ResolvedApi, name: &str) -> bool {
        match self.profile {
            Profile::Compat => resolved.enum_supported(name, self.feature, false),
            Profile::Core => resolved.enum_supported(name, self.feature, true),
            Profile::Ext => {
                !resolved.enum_supported(name, self.feature, false)
                    && resolved.enum_in_extension(name)
            }
        }
    }

    /// Whether a command belongs to this subtree.
    pub fn selects_command(&self, resolved: &ResolvedApi, name: &str) -> bool {
        match self.profile {
            Profile::Compat => resolved.command_supported(name, self.feature, false),
            Profile::Core => resolved.command_supported(name, self.feature, true),
            Profile::Ext => {
                !resolved.command_supported(name, self.feature, false)
                    && resolved.command_in_extension(name)
            }
        }
    }
}

/// Every subtree generated for the given feature versions: the "all" tree,
/// then per feature compat, core (from the first core-profile version on)
/// and extension-forward.
pub fn subtrees_for(features: impl IntoIterator<Item = Version>) -> Vec<Subtree> {
    let mut out = vec![Subtree::all()];
    for version in features {
        out.push(Subtree::new(version, Profile::Compat));
        if version >= FIRST_CORE_VERSION {
            out.push(Subtree::new(version, Profile::Core));
        }
        out.push(Subtree::new(version, Profile::Ext));
    }
    out
}
