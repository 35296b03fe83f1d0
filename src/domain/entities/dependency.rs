//! Dependency entities
//!
//! Two shapes of the same data:
//! - [`NestedDependencies`] is the descriptor's native tree
//!   (required/optional/group, each holding package/subpackage/extension
//!   entries stored either bare or as a list).
//! - [`DependencyRecord`] is the uniform flat row the session edits.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{lenient_version, OneOrMany, VersionConstraint};

/// Top-level requirement level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Required,
    Optional,
}

impl Requirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requirement::Required => "required",
            Requirement::Optional => "optional",
        }
    }
}

/// Package-like dependency kinds (both carry a channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    Package,
    Subpackage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Package,
    Subpackage,
    Extension,
}

impl DependencyKind {
    pub const ALL: [DependencyKind; 3] = [
        DependencyKind::Package,
        DependencyKind::Subpackage,
        DependencyKind::Extension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Package => "package",
            DependencyKind::Subpackage => "subpackage",
            DependencyKind::Extension => "extension",
        }
    }
}

/// Named optional bundle of dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyGroup {
    pub name: String,
    #[serde(default)]
    pub hint: String,
}

impl DependencyGroup {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }
}

/// What a dependency points at. Extensions carry no channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DependencyTarget {
    Package { name: String, channel: String },
    Subpackage { name: String, channel: String },
    Extension { extension: String },
}

impl DependencyTarget {
    pub fn kind(&self) -> DependencyKind {
        match self {
            DependencyTarget::Package { .. } => DependencyKind::Package,
            DependencyTarget::Subpackage { .. } => DependencyKind::Subpackage,
            DependencyTarget::Extension { .. } => DependencyKind::Extension,
        }
    }

    /// Package or subpackage name, or the extension name.
    pub fn name(&self) -> &str {
        match self {
            DependencyTarget::Package { name, .. } | DependencyTarget::Subpackage { name, .. } => {
                name
            }
            DependencyTarget::Extension { extension } => extension,
        }
    }

    pub fn channel(&self) -> Option<&str> {
        match self {
            DependencyTarget::Package { channel, .. }
            | DependencyTarget::Subpackage { channel, .. } => Some(channel),
            DependencyTarget::Extension { .. } => None,
        }
    }
}

/// Where a dependency sits: the default set or a named group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Required,
    Optional,
    Group(DependencyGroup),
}

impl From<Requirement> for Placement {
    fn from(requirement: Requirement) -> Self {
        match requirement {
            Requirement::Required => Placement::Required,
            Requirement::Optional => Placement::Optional,
        }
    }
}

/// One flat dependency row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub target: DependencyTarget,
    pub placement: Placement,
    #[serde(default)]
    pub constraint: VersionConstraint,
}

impl DependencyRecord {
    pub fn new(target: DependencyTarget, placement: Placement, constraint: VersionConstraint) -> Self {
        Self {
            target,
            placement,
            constraint,
        }
    }

    pub fn kind(&self) -> DependencyKind {
        self.target.kind()
    }

    pub fn group(&self) -> Option<&DependencyGroup> {
        match &self.placement {
            Placement::Group(group) => Some(group),
            _ => None,
        }
    }

    /// `required`, `optional`, or `group-<kind>` for group members.
    pub fn type_tag(&self) -> String {
        match &self.placement {
            Placement::Required => "required".to_string(),
            Placement::Optional => "optional".to_string(),
            Placement::Group(_) => format!("group-{}", self.kind().as_str()),
        }
    }
}

/// One entry of the descriptor's native dependency tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedDependency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "lenient_version", skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, deserialize_with = "lenient_version", skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default, deserialize_with = "lenient_version", skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
    /// May hold several excluded versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<OneOrMany<String>>,
}

impl NestedDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_constraint(mut self, constraint: &VersionConstraint) -> Self {
        let c = constraint.normalized();
        self.min = c.min;
        self.max = c.max;
        self.recommended = c.recommended;
        self.exclude = c.exclude.map(OneOrMany::One);
        self
    }
}

/// Package/subpackage/extension entries of one dependency set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<OneOrMany<NestedDependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subpackage: Option<OneOrMany<NestedDependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<OneOrMany<NestedDependency>>,
}

impl DependencySet {
    pub fn entries(&self, kind: DependencyKind) -> &[NestedDependency] {
        let slot = match kind {
            DependencyKind::Package => &self.package,
            DependencyKind::Subpackage => &self.subpackage,
            DependencyKind::Extension => &self.extension,
        };
        slot.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, kind: DependencyKind, dep: NestedDependency) {
        let slot = match kind {
            DependencyKind::Package => &mut self.package,
            DependencyKind::Subpackage => &mut self.subpackage,
            DependencyKind::Extension => &mut self.extension,
        };
        match slot {
            Some(existing) => existing.push(dep),
            None => *slot = Some(OneOrMany::One(dep)),
        }
    }

    pub fn is_empty(&self) -> bool {
        DependencyKind::ALL
            .iter()
            .all(|kind| self.entries(*kind).is_empty())
    }
}

/// A dependency group in native form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedGroup {
    pub attribs: DependencyGroup,
    #[serde(flatten)]
    pub members: DependencySet,
}

/// The descriptor's native dependency tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedDependencies {
    /// Installer requirement, part of the required set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer: Option<NestedDependency>,
    /// Runtime requirement, part of the required set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<NestedDependency>,
    #[serde(default)]
    pub required: DependencySet,
    #[serde(default)]
    pub optional: DependencySet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<OneOrMany<NestedGroup>>,
}

impl NestedDependencies {
    pub fn set(&self, requirement: Requirement) -> &DependencySet {
        match requirement {
            Requirement::Required => &self.required,
            Requirement::Optional => &self.optional,
        }
    }

    pub fn set_mut(&mut self, requirement: Requirement) -> &mut DependencySet {
        match requirement {
            Requirement::Required => &mut self.required,
            Requirement::Optional => &mut self.optional,
        }
    }

    pub fn groups(&self) -> &[NestedGroup] {
        self.group.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }

    /// Find or create the group named `name`.
    pub fn group_mut(&mut self, name: &str, hint: &str) -> &mut NestedGroup {
        let mut groups: Vec<NestedGroup> = match self.group.take() {
            Some(OneOrMany::One(g)) => vec![g],
            Some(OneOrMany::Many(gs)) => gs,
            None => Vec::new(),
        };
        let idx = match groups.iter().position(|g| g.attribs.name == name) {
            Some(idx) => idx,
            None => {
                groups.push(NestedGroup {
                    attribs: DependencyGroup::new(name, hint),
                    members: DependencySet::default(),
                });
                groups.len() - 1
            }
        };
        let store = self.group.insert(OneOrMany::Many(groups));
        match store {
            OneOrMany::Many(gs) => &mut gs[idx],
            OneOrMany::One(g) => g,
        }
    }
}
