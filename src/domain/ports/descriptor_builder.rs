//! DescriptorBuilder port
//!
//! The manifest-building API the frontend drives. It owns the manifest model,
//! its validation rules and its wire format; the frontend only issues calls in
//! the right order and collects the warnings they return.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Maintainer, NestedDependencies, PackageKind, Replacement, Requirement};
use crate::domain::value_objects::{Severity, VersionConstraint};

use super::TreeGenerator;

/// File name used when the session does not name one.
pub const DEFAULT_PACKAGE_FILE: &str = "package.json";

/// Warning (or error) returned by a builder call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderWarning {
    pub severity: Severity,
    pub message: String,
}

impl BuilderWarning {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for BuilderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.as_str(), self.message)
    }
}

impl std::error::Error for BuilderWarning {}

pub type BuilderResult<T = ()> = Result<T, BuilderWarning>;

/// Builder-level options.
///
/// `package_directory` always carries a trailing `/` so package-relative paths
/// can be derived by prefix stripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    pub output_directory: Option<String>,
    pub package_file: String,
    pub package_directory: String,
    pub path_to_package_file: Option<String>,
    pub base_install_dir: String,
    pub filelist_generator: String,
    pub clear_contents: bool,
    /// Extension -> role, `*` is the fallback
    pub roles: BTreeMap<String, String>,
    /// Directory -> role
    pub dir_roles: BTreeMap<String, String>,
    /// Package-relative path -> role, wins over every rule
    pub exceptions: BTreeMap<String, String>,
    pub changelog_old_to_new: bool,
    pub simple_output: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            output_directory: None,
            package_file: DEFAULT_PACKAGE_FILE.to_string(),
            package_directory: "./".to_string(),
            path_to_package_file: None,
            base_install_dir: "/".to_string(),
            filelist_generator: "File".to_string(),
            clear_contents: true,
            roles: BTreeMap::new(),
            dir_roles: BTreeMap::new(),
            exceptions: BTreeMap::new(),
            changelog_old_to_new: true,
            simple_output: false,
        }
    }
}

impl BuilderOptions {
    /// Merge `other` into `self`: map options merge key by key, everything
    /// else is replaced.
    pub fn merge(&mut self, other: BuilderOptions) {
        let BuilderOptions {
            output_directory,
            package_file,
            package_directory,
            path_to_package_file,
            base_install_dir,
            filelist_generator,
            clear_contents,
            roles,
            dir_roles,
            exceptions,
            changelog_old_to_new,
            simple_output,
        } = other;
        self.output_directory = output_directory;
        self.package_file = package_file;
        self.package_directory = package_directory;
        self.path_to_package_file = path_to_package_file;
        self.base_install_dir = base_install_dir;
        self.filelist_generator = filelist_generator;
        self.clear_contents = clear_contents;
        self.roles.extend(roles);
        self.dir_roles.extend(dir_roles);
        self.exceptions.extend(exceptions);
        self.changelog_old_to_new = changelog_old_to_new;
        self.simple_output = simple_output;
    }

    /// Where the primary package file is written.
    pub fn output_path(&self) -> PathBuf {
        let dir = self
            .output_directory
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.package_directory);
        Path::new(dir).join(&self.package_file)
    }
}

/// License text plus optional location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Descriptive fields read back for page defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub channel: String,
    pub package_type: String,
    pub summary: String,
    pub description: String,
    pub license: License,
    pub release_version: String,
    pub release_stability: String,
    pub api_version: String,
    pub api_stability: String,
    pub date: Option<String>,
    pub notes: String,
}

/// One file of an existing manifest's contents section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub path: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

/// Result of serializing a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// Rendered document, nothing touched on disk
    Preview(String),
}

pub trait DescriptorBuilder {
    // === Options ===

    fn options(&self) -> &BuilderOptions;
    /// With `merge`, map options are merged into the current ones instead of
    /// replacing them.
    fn set_options(&mut self, options: BuilderOptions, merge: bool) -> BuilderResult;
    fn set_package_file(&mut self, path: &str);

    // === Identity ===

    fn clear_deps(&mut self);
    fn clear_contents(&mut self);
    fn set_installer_dep(&mut self, constraint: &VersionConstraint) -> BuilderResult;
    fn set_runtime_dep(&mut self, constraint: &VersionConstraint) -> BuilderResult;
    fn set_channel(&mut self, channel: &str);
    fn set_package(&mut self, name: &str);
    fn set_package_type(&mut self, package_type: &str) -> BuilderResult;
    fn set_summary(&mut self, summary: &str);
    fn set_description(&mut self, description: &str);

    // === Release ===

    fn set_license(&mut self, content: &str, uri: Option<&str>);
    /// Open a new release entry; later release-scoped calls apply to it.
    fn add_release(&mut self);
    fn set_api_version(&mut self, version: &str);
    fn set_api_stability(&mut self, stability: &str) -> BuilderResult;
    fn set_release_version(&mut self, version: &str);
    fn set_release_stability(&mut self, stability: &str) -> BuilderResult;
    fn set_notes(&mut self, notes: &str);

    // === Dependencies ===

    fn add_package_dep(
        &mut self,
        requirement: Requirement,
        kind: PackageKind,
        name: &str,
        channel: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult;
    fn add_extension_dep(
        &mut self,
        requirement: Requirement,
        name: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult;
    fn add_dependency_group(&mut self, name: &str, hint: &str) -> BuilderResult;
    fn add_group_package_dep(
        &mut self,
        kind: PackageKind,
        group: &str,
        name: &str,
        channel: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult;
    fn add_group_extension_dep(
        &mut self,
        group: &str,
        name: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult;
    /// Native nested dependency tree, as stored in the manifest.
    fn deps(&self) -> NestedDependencies;

    // === Files ===

    fn add_ignore(&mut self, path: &str);
    fn add_windows_eol(&mut self, path: &str);
    fn add_unix_eol(&mut self, path: &str);
    fn add_install_as(&mut self, path: &str, install_as: &str);
    fn add_replacement(&mut self, path: &str, kind: &str, from: &str, to: &str) -> BuilderResult;
    /// Restrict the current release entry to one OS.
    fn set_os_install_condition(&mut self, os: &str);
    /// Exclude a file from the current release entry.
    fn add_ignore_to_release(&mut self, path: &str);
    /// Contents section of the manifest, as imported or last generated.
    fn file_list(&self) -> Vec<ContentEntry>;

    // === Maintainers ===

    fn maintainers(&self) -> Vec<Maintainer>;
    fn add_maintainer(&mut self, maintainer: Maintainer) -> BuilderResult;
    /// `false` when no maintainer has this handle.
    fn delete_maintainer(&mut self, handle: &str) -> bool;

    // === Output ===

    fn metadata(&self) -> PackageMetadata;
    /// Enumerate the package tree with `generator` and assign a role to
    /// every file.
    fn generate_contents(&mut self, generator: &dyn TreeGenerator) -> BuilderResult;
    /// Warnings recorded since the last call; the list is purged.
    fn validation_warnings(&mut self) -> Vec<BuilderWarning>;
    fn write_package_file(&mut self, preview: bool) -> BuilderResult<WriteOutcome>;
    /// Write a manifest readable by legacy consumers next to the primary one.
    fn export_legacy_package_file(&mut self) -> BuilderResult<PathBuf>;
}

/// Creates builders for new packages or by importing an existing manifest.
pub trait DescriptorFactory {
    type Builder: DescriptorBuilder + Serialize + DeserializeOwned;

    fn create(&self, options: BuilderOptions) -> Self::Builder;
    fn import(&self, package_file: &Path, options: BuilderOptions) -> BuilderResult<Self::Builder>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_extends_maps_and_replaces_scalars() {
        let mut base = BuilderOptions::default();
        base.exceptions.insert("README".to_string(), "doc".to_string());

        let mut update = BuilderOptions {
            filelist_generator: "Git".to_string(),
            ..BuilderOptions::default()
        };
        update.exceptions.insert("bin/tool".to_string(), "script".to_string());
        base.merge(update);

        assert_eq!(base.filelist_generator, "Git");
        assert_eq!(base.exceptions.len(), 2);
    }

    #[test]
    fn output_path_falls_back_to_package_directory() {
        let mut options = BuilderOptions {
            package_directory: "/pkg/".to_string(),
            ..BuilderOptions::default()
        };
        assert_eq!(options.output_path(), PathBuf::from("/pkg/package.json"));

        options.output_directory = Some("/out".to_string());
        assert_eq!(options.output_path(), PathBuf::from("/out/package.json"));
    }

    #[test]
    fn warning_display_includes_severity() {
        let warning = BuilderWarning::error("missing channel");
        assert!(warning.is_error());
        assert_eq!(warning.to_string(), "error: missing channel");
    }
}
