//! JSON descriptor builder
//!
//! Implements the builder port over [`PackageManifest`]. Per-file directives
//! (ignore, line endings, install names, replace tasks) are collected while
//! the frontend drives the builder and applied when the contents section is
//! generated.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::entities::{
    DependencyKind, Maintainer, NestedDependencies, NestedDependency, PackageKind, Replacement,
    Requirement,
};
use crate::domain::ports::{
    BuilderOptions, BuilderResult, BuilderWarning, ContentEntry, DescriptorBuilder,
    DescriptorFactory, License, PackageMetadata, TreeGenerator, WriteOutcome,
};
use crate::domain::services::{path_parts, relative_path, ROOT_DIR, WILDCARD};
use crate::domain::value_objects::{LineEnding, VersionConstraint};
use crate::infrastructure::fs::atomic_write;

use super::manifest::{ChangelogEntry, ContentFile, LegacyManifest, PackageManifest};

pub const STABILITIES: [&str; 5] = ["snapshot", "devel", "alpha", "beta", "stable"];
pub const PACKAGE_TYPES: [&str; 3] = ["php", "extsrc", "extbin"];
pub const REPLACEMENT_TYPES: [&str; 3] = ["php-const", "pear-config", "package-info"];

/// Role of a file no rule matches.
const FALLBACK_ROLE: &str = "data";
/// Suffix of the legacy export's file stem.
const LEGACY_SUFFIX: &str = "-v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonDescriptorBuilder {
    options: BuilderOptions,
    manifest: PackageManifest,
    /// Where the manifest was imported from or will be written
    #[serde(default)]
    package_file: Option<String>,
    #[serde(default)]
    ignored: BTreeSet<String>,
    #[serde(default)]
    eol: BTreeMap<String, LineEnding>,
    #[serde(default)]
    install_as: BTreeMap<String, String>,
    #[serde(default)]
    replacements: BTreeMap<String, Vec<Replacement>>,
    #[serde(default)]
    pending: Vec<BuilderWarning>,
}

impl JsonDescriptorBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn from_manifest(manifest: PackageManifest, options: BuilderOptions) -> Self {
        Self {
            options,
            manifest,
            ..Self::default()
        }
    }

    pub fn manifest(&self) -> &PackageManifest {
        &self.manifest
    }

    /// Role for a package-relative path: explicit exception, then the
    /// nearest configured directory, then the extension, then the wildcard.
    pub fn role_for(&self, path: &str) -> String {
        if let Some(role) = self.options.exceptions.get(path) {
            return role.clone();
        }
        let parts = path_parts(path);
        let mut dir = parts.dirname;
        while dir != ROOT_DIR && !dir.is_empty() {
            if let Some(role) = self.options.dir_roles.get(dir) {
                return role.clone();
            }
            dir = match dir.rfind('/') {
                Some(idx) => &dir[..idx],
                None => ROOT_DIR,
            };
        }
        parts
            .extension
            .and_then(|ext| self.options.roles.get(ext))
            .or_else(|| self.options.roles.get(WILDCARD))
            .cloned()
            .unwrap_or_else(|| FALLBACK_ROLE.to_string())
    }

    /// Package-relative names of the manifests themselves, never packaged.
    fn own_files(&self) -> BTreeSet<String> {
        let package_dir = &self.options.package_directory;
        let mut own = BTreeSet::new();
        let primary = self.options.output_path();
        own.insert(relative_path(&slashed(&primary), package_dir).to_string());
        own.insert(relative_path(&slashed(&self.legacy_path()), package_dir).to_string());
        if let Some(file) = &self.package_file {
            own.insert(relative_path(file, package_dir).to_string());
        }
        own
    }

    fn legacy_path(&self) -> PathBuf {
        let primary = self.options.output_path();
        let stem = Path::new(&self.options.package_file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string());
        let name = format!("{}{}.json", stem, LEGACY_SUFFIX);
        match primary.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        }
    }

    fn render<T: Serialize>(&self, document: &T) -> BuilderResult<String> {
        let rendered = if self.options.simple_output {
            serde_json::to_string(document)
        } else {
            serde_json::to_string_pretty(document)
        };
        rendered.map_err(|e| BuilderWarning::error(format!("cannot render package file: {}", e)))
    }

    /// Record the current version in the changelog, replacing an entry for
    /// the same release version.
    fn update_changelog(&mut self) {
        let manifest = &mut self.manifest;
        if manifest.version.release.is_empty() {
            return;
        }
        let entry = ChangelogEntry {
            version: manifest.version.clone(),
            stability: manifest.stability.clone(),
            date: manifest.date.clone(),
            notes: manifest.notes.clone(),
        };
        manifest
            .changelog
            .retain(|e| e.version.release != entry.version.release);
        if self.options.changelog_old_to_new {
            manifest.changelog.push(entry);
        } else {
            manifest.changelog.insert(0, entry);
        }
    }
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn check_stability(stability: &str) -> BuilderResult {
    if STABILITIES.contains(&stability) {
        Ok(())
    } else {
        Err(BuilderWarning::error(format!(
            "invalid stability \"{}\"; must be one of {}",
            stability,
            STABILITIES.join(", ")
        )))
    }
}

fn dependency_kind(kind: PackageKind) -> DependencyKind {
    match kind {
        PackageKind::Package => DependencyKind::Package,
        PackageKind::Subpackage => DependencyKind::Subpackage,
    }
}

fn require_name(what: &str, name: &str) -> BuilderResult {
    if name.trim().is_empty() {
        Err(BuilderWarning::error(format!("{} dependency has no name", what)))
    } else {
        Ok(())
    }
}

fn require_group(deps: &NestedDependencies, group: &str) -> BuilderResult {
    if deps.groups().iter().any(|g| g.attribs.name == group) {
        Ok(())
    } else {
        Err(BuilderWarning::error(format!(
            "dependency group \"{}\" has not been declared",
            group
        )))
    }
}

impl DescriptorBuilder for JsonDescriptorBuilder {
    fn options(&self) -> &BuilderOptions {
        &self.options
    }

    fn set_options(&mut self, options: BuilderOptions, merge: bool) -> BuilderResult {
        if options.package_directory.trim().is_empty() {
            return Err(BuilderWarning::error("package directory must not be empty"));
        }
        if merge {
            self.options.merge(options);
        } else {
            self.options = options;
        }
        Ok(())
    }

    fn set_package_file(&mut self, path: &str) {
        if let Some(name) = Path::new(path).file_name() {
            self.options.package_file = name.to_string_lossy().into_owned();
        }
        self.package_file = Some(path.to_string());
    }

    fn clear_deps(&mut self) {
        self.manifest.dependencies = NestedDependencies::default();
    }

    fn clear_contents(&mut self) {
        self.manifest.contents.files.clear();
        self.manifest.releases.clear();
        self.ignored.clear();
        self.eol.clear();
        self.install_as.clear();
        self.replacements.clear();
    }

    fn set_installer_dep(&mut self, constraint: &VersionConstraint) -> BuilderResult {
        let constraint = constraint.normalized();
        if constraint.min.is_none() {
            return Err(BuilderWarning::error(
                "installer dependency needs a minimum version",
            ));
        }
        self.manifest.dependencies.installer =
            Some(NestedDependency::new("installer").with_constraint(&constraint));
        Ok(())
    }

    fn set_runtime_dep(&mut self, constraint: &VersionConstraint) -> BuilderResult {
        let mut constraint = constraint.normalized();
        if constraint.min.is_none() {
            return Err(BuilderWarning::error(
                "runtime dependency needs a minimum version",
            ));
        }
        constraint.recommended = None;
        self.manifest.dependencies.runtime =
            Some(NestedDependency::new("php").with_constraint(&constraint));
        Ok(())
    }

    fn set_channel(&mut self, channel: &str) {
        self.manifest.channel = channel.to_string();
    }

    fn set_package(&mut self, name: &str) {
        self.manifest.name = name.to_string();
    }

    fn set_package_type(&mut self, package_type: &str) -> BuilderResult {
        if !PACKAGE_TYPES.contains(&package_type) {
            return Err(BuilderWarning::error(format!(
                "invalid package type \"{}\"; must be one of {}",
                package_type,
                PACKAGE_TYPES.join(", ")
            )));
        }
        self.manifest.package_type = package_type.to_string();
        Ok(())
    }

    fn set_summary(&mut self, summary: &str) {
        self.manifest.summary = summary.to_string();
    }

    fn set_description(&mut self, description: &str) {
        self.manifest.description = description.to_string();
    }

    fn set_license(&mut self, content: &str, uri: Option<&str>) {
        self.manifest.license = License {
            content: content.to_string(),
            uri: uri.map(str::to_string),
        };
    }

    fn add_release(&mut self) {
        self.manifest.releases.push(Default::default());
    }

    fn set_api_version(&mut self, version: &str) {
        self.manifest.version.api = version.to_string();
    }

    fn set_api_stability(&mut self, stability: &str) -> BuilderResult {
        check_stability(stability)?;
        self.manifest.stability.api = stability.to_string();
        Ok(())
    }

    fn set_release_version(&mut self, version: &str) {
        self.manifest.version.release = version.to_string();
    }

    fn set_release_stability(&mut self, stability: &str) -> BuilderResult {
        check_stability(stability)?;
        self.manifest.stability.release = stability.to_string();
        Ok(())
    }

    fn set_notes(&mut self, notes: &str) {
        self.manifest.notes = notes.to_string();
    }

    fn add_package_dep(
        &mut self,
        requirement: Requirement,
        kind: PackageKind,
        name: &str,
        channel: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult {
        require_name(requirement.as_str(), name)?;
        let dep = NestedDependency::new(name)
            .with_channel(channel)
            .with_constraint(constraint);
        self.manifest
            .dependencies
            .set_mut(requirement)
            .push(dependency_kind(kind), dep);
        Ok(())
    }

    fn add_extension_dep(
        &mut self,
        requirement: Requirement,
        name: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult {
        require_name(requirement.as_str(), name)?;
        let dep = NestedDependency::new(name).with_constraint(constraint);
        self.manifest
            .dependencies
            .set_mut(requirement)
            .push(DependencyKind::Extension, dep);
        Ok(())
    }

    fn add_dependency_group(&mut self, name: &str, hint: &str) -> BuilderResult {
        if name.trim().is_empty() {
            return Err(BuilderWarning::error("dependency group has no name"));
        }
        self.manifest.dependencies.group_mut(name, hint);
        Ok(())
    }

    fn add_group_package_dep(
        &mut self,
        kind: PackageKind,
        group: &str,
        name: &str,
        channel: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult {
        require_group(&self.manifest.dependencies, group)?;
        require_name("group", name)?;
        let dep = NestedDependency::new(name)
            .with_channel(channel)
            .with_constraint(constraint);
        self.manifest
            .dependencies
            .group_mut(group, "")
            .members
            .push(dependency_kind(kind), dep);
        Ok(())
    }

    fn add_group_extension_dep(
        &mut self,
        group: &str,
        name: &str,
        constraint: &VersionConstraint,
    ) -> BuilderResult {
        require_group(&self.manifest.dependencies, group)?;
        require_name("group", name)?;
        let dep = NestedDependency::new(name).with_constraint(constraint);
        self.manifest
            .dependencies
            .group_mut(group, "")
            .members
            .push(DependencyKind::Extension, dep);
        Ok(())
    }

    fn deps(&self) -> NestedDependencies {
        self.manifest.dependencies.clone()
    }

    fn add_ignore(&mut self, path: &str) {
        self.ignored.insert(path.to_string());
    }

    fn add_windows_eol(&mut self, path: &str) {
        self.eol.insert(path.to_string(), LineEnding::Windows);
    }

    fn add_unix_eol(&mut self, path: &str) {
        self.eol.insert(path.to_string(), LineEnding::Unix);
    }

    fn add_install_as(&mut self, path: &str, install_as: &str) {
        self.install_as
            .insert(path.to_string(), install_as.to_string());
    }

    fn add_replacement(&mut self, path: &str, kind: &str, from: &str, to: &str) -> BuilderResult {
        if !REPLACEMENT_TYPES.contains(&kind) {
            return Err(BuilderWarning::error(format!(
                "invalid replacement type \"{}\" for {}; must be one of {}",
                kind,
                path,
                REPLACEMENT_TYPES.join(", ")
            )));
        }
        if from.is_empty() || to.is_empty() {
            return Err(BuilderWarning::error(format!(
                "replacement for {} needs both a search string and a value",
                path
            )));
        }
        self.replacements
            .entry(path.to_string())
            .or_default()
            .push(Replacement::new(from, kind, to));
        Ok(())
    }

    fn set_os_install_condition(&mut self, os: &str) {
        self.manifest.current_release().os = Some(os.to_string());
    }

    fn add_ignore_to_release(&mut self, path: &str) {
        self.manifest.current_release().ignore.push(path.to_string());
    }

    fn file_list(&self) -> Vec<ContentEntry> {
        self.manifest
            .contents
            .files
            .iter()
            .map(|file| ContentEntry {
                path: file.name.clone(),
                role: Some(file.role.clone()).filter(|r| !r.is_empty()),
                replacements: file.replacements.clone(),
            })
            .collect()
    }

    fn maintainers(&self) -> Vec<Maintainer> {
        self.manifest.maintainers.clone()
    }

    fn add_maintainer(&mut self, maintainer: Maintainer) -> BuilderResult {
        if maintainer.handle.trim().is_empty() {
            return Err(BuilderWarning::error("maintainer handle must not be empty"));
        }
        if maintainer.name.trim().is_empty() || maintainer.email.trim().is_empty() {
            return Err(BuilderWarning::error(format!(
                "maintainer \"{}\" needs a name and an email",
                maintainer.handle
            )));
        }
        let maintainers = &mut self.manifest.maintainers;
        match maintainers.iter_mut().find(|m| m.handle == maintainer.handle) {
            Some(existing) => *existing = maintainer,
            None => maintainers.push(maintainer),
        }
        Ok(())
    }

    fn delete_maintainer(&mut self, handle: &str) -> bool {
        let before = self.manifest.maintainers.len();
        self.manifest.maintainers.retain(|m| m.handle != handle);
        self.manifest.maintainers.len() != before
    }

    fn metadata(&self) -> PackageMetadata {
        let m = &self.manifest;
        PackageMetadata {
            name: m.name.clone(),
            channel: m.channel.clone(),
            package_type: m.package_type.clone(),
            summary: m.summary.clone(),
            description: m.description.clone(),
            license: m.license.clone(),
            release_version: m.version.release.clone(),
            release_stability: m.stability.release.clone(),
            api_version: m.version.api.clone(),
            api_stability: m.stability.api.clone(),
            date: m.date.clone(),
            notes: m.notes.clone(),
        }
    }

    fn generate_contents(&mut self, generator: &dyn TreeGenerator) -> BuilderResult {
        let root = PathBuf::from(&self.options.package_directory);
        let paths = generator
            .enumerate(&root)
            .map_err(|e| BuilderWarning::error(e.to_string()))?;

        let own = self.own_files();
        let files: Vec<ContentFile> = paths
            .iter()
            .filter(|path| !self.ignored.contains(*path) && !own.contains(*path))
            .map(|path| ContentFile {
                name: path.clone(),
                role: self.role_for(path),
                eol: self.eol.get(path).copied().unwrap_or_default(),
                install_as: self.install_as.get(path).cloned(),
                replacements: self.replacements.get(path).cloned().unwrap_or_default(),
            })
            .collect();

        for path in self.replacements.keys().chain(self.install_as.keys()) {
            if !paths.contains(path) {
                self.pending.push(BuilderWarning::warning(format!(
                    "directive for {} ignored: file is not in the package directory",
                    path
                )));
            }
        }
        if files.is_empty() {
            warn!(root = %root.display(), "no files to package");
            self.pending
                .push(BuilderWarning::warning("no files found to package"));
        }

        debug!(
            generator = generator.name(),
            files = files.len(),
            skipped = paths.len() - files.len(),
            "contents generated"
        );
        self.manifest.contents.base_install_dir = self.options.base_install_dir.clone();
        self.manifest.contents.files = files;
        if self.manifest.date.is_none() {
            self.manifest.date = Some(Utc::now().format("%Y-%m-%d").to_string());
        }
        self.update_changelog();
        Ok(())
    }

    fn validation_warnings(&mut self) -> Vec<BuilderWarning> {
        std::mem::take(&mut self.pending)
    }

    fn write_package_file(&mut self, preview: bool) -> BuilderResult<WriteOutcome> {
        let missing = self.manifest.missing_fields();
        if !missing.is_empty() {
            return Err(BuilderWarning::error(format!(
                "package file is missing required fields: {}",
                missing.join(", ")
            )));
        }
        let rendered = self.render(&self.manifest)?;
        if preview {
            return Ok(WriteOutcome::Preview(rendered));
        }

        let path = self.options.output_path();
        atomic_write(&path, &rendered).map_err(|e| {
            BuilderWarning::error(format!("cannot write {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "package file saved");
        Ok(WriteOutcome::Written(path))
    }

    fn export_legacy_package_file(&mut self) -> BuilderResult<PathBuf> {
        if self.manifest.name.trim().is_empty() {
            return Err(BuilderWarning::error(
                "legacy package file needs a package name",
            ));
        }
        let rendered = self.render(&LegacyManifest::from(&self.manifest))?;
        let path = self.legacy_path();
        atomic_write(&path, &rendered).map_err(|e| {
            BuilderWarning::error(format!("cannot write {}: {}", path.display(), e))
        })?;
        info!(path = %path.display(), "legacy package file saved");
        Ok(path)
    }
}

/// Creates [`JsonDescriptorBuilder`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDescriptorFactory;

impl JsonDescriptorFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorFactory for JsonDescriptorFactory {
    type Builder = JsonDescriptorBuilder;

    fn create(&self, options: BuilderOptions) -> Self::Builder {
        JsonDescriptorBuilder::new(options)
    }

    fn import(&self, package_file: &Path, options: BuilderOptions) -> BuilderResult<Self::Builder> {
        let content = fs::read_to_string(package_file).map_err(|e| {
            BuilderWarning::error(format!("cannot read {}: {}", package_file.display(), e))
        })?;
        let manifest: PackageManifest = serde_json::from_str(&content).map_err(|e| {
            BuilderWarning::error(format!("cannot parse {}: {}", package_file.display(), e))
        })?;
        debug!(
            path = %package_file.display(),
            files = manifest.contents.files.len(),
            "manifest imported"
        );
        Ok(JsonDescriptorBuilder::from_manifest(manifest, options))
    }
}
