//! JSON package manifest model
//!
//! The document written by [`super::JsonDescriptorBuilder`]. Field names are
//! the on-disk keys; empty sections are left out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Maintainer, NestedDependencies, Replacement};
use crate::domain::ports::License;
use crate::domain::value_objects::LineEnding;

/// Manifest format written by this crate.
pub const MANIFEST_VERSION: &str = "2.0";
/// Format of the legacy export.
pub const LEGACY_MANIFEST_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPair {
    #[serde(default)]
    pub release: String,
    #[serde(default)]
    pub api: String,
}

impl VersionPair {
    fn is_empty(&self) -> bool {
        self.release.is_empty() && self.api.is_empty()
    }
}

/// One file of the contents section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFile {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "LineEnding::is_none")]
    pub eol: LineEnding,
    #[serde(default, rename = "installAs", skip_serializing_if = "Option::is_none")]
    pub install_as: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replacements: Vec<Replacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contents {
    #[serde(rename = "baseInstallDir", default = "default_base_install_dir")]
    pub base_install_dir: String,
    #[serde(default)]
    pub files: Vec<ContentFile>,
}

fn default_base_install_dir() -> String {
    "/".to_string()
}

impl Default for Contents {
    fn default() -> Self {
        Self {
            base_install_dir: default_base_install_dir(),
            files: Vec::new(),
        }
    }
}

/// One release variant, optionally bound to an operating system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    /// Files left out of this variant
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

/// Version history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub version: VersionPair,
    pub stability: VersionPair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default = "manifest_version")]
    pub manifest_version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default, rename = "type")]
    pub package_type: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintainers: Vec<Maintainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "VersionPair::is_empty")]
    pub version: VersionPair,
    #[serde(default, skip_serializing_if = "VersionPair::is_empty")]
    pub stability: VersionPair,
    #[serde(default)]
    pub license: License,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub contents: Contents,
    #[serde(default)]
    pub dependencies: NestedDependencies,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub releases: Vec<ReleaseEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangelogEntry>,
}

fn manifest_version() -> String {
    MANIFEST_VERSION.to_string()
}

impl Default for PackageManifest {
    fn default() -> Self {
        Self {
            manifest_version: manifest_version(),
            name: String::new(),
            channel: String::new(),
            package_type: String::new(),
            summary: String::new(),
            description: String::new(),
            maintainers: Vec::new(),
            date: None,
            version: VersionPair::default(),
            stability: VersionPair::default(),
            license: License::default(),
            notes: String::new(),
            contents: Contents::default(),
            dependencies: NestedDependencies::default(),
            releases: Vec::new(),
            changelog: Vec::new(),
        }
    }
}

impl PackageManifest {
    /// Release entry later release-scoped calls apply to.
    pub fn current_release(&mut self) -> &mut ReleaseEntry {
        if self.releases.is_empty() {
            self.releases.push(ReleaseEntry::default());
        }
        let last = self.releases.len() - 1;
        &mut self.releases[last]
    }

    /// Names of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks: [(&'static str, &str); 9] = [
            ("name", &self.name),
            ("channel", &self.channel),
            ("type", &self.package_type),
            ("summary", &self.summary),
            ("description", &self.description),
            ("license", &self.license.content),
            ("version.release", &self.version.release),
            ("version.api", &self.version.api),
            ("stability.release", &self.stability.release),
        ];
        let mut missing: Vec<&'static str> = checks
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();
        if self.maintainers.iter().all(|m| !m.active) {
            missing.push("maintainers");
        }
        missing
    }
}

/// Flat manifest for consumers that predate dependency groups and
/// per-OS release variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyManifest {
    pub manifest_version: String,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub maintainers: Vec<Maintainer>,
    pub version: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub license: String,
    pub notes: String,
    /// File name -> role
    pub files: BTreeMap<String, String>,
    pub dependencies: NestedDependencies,
}

impl From<&PackageManifest> for LegacyManifest {
    fn from(manifest: &PackageManifest) -> Self {
        let mut dependencies = manifest.dependencies.clone();
        dependencies.group = None;
        Self {
            manifest_version: LEGACY_MANIFEST_VERSION.to_string(),
            name: manifest.name.clone(),
            summary: manifest.summary.clone(),
            description: manifest.description.clone(),
            maintainers: manifest.maintainers.clone(),
            version: manifest.version.release.clone(),
            state: manifest.stability.release.clone(),
            date: manifest.date.clone(),
            license: manifest.license.content.clone(),
            notes: manifest.notes.clone(),
            files: manifest
                .contents
                .files
                .iter()
                .map(|f| (f.name.clone(), f.role.clone()))
                .collect(),
            dependencies,
        }
    }
}
