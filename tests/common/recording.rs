//! Descriptor builder that records the calls it receives.

use std::path::PathBuf;

use pkgfile_frontend::domain::entities::{
    Maintainer, NestedDependencies, PackageKind, Requirement,
};
use pkgfile_frontend::domain::ports::{
    BuilderOptions, BuilderResult, BuilderWarning, ContentEntry, DescriptorBuilder,
    PackageMetadata, TreeGenerator, WriteOutcome,
};
use pkgfile_frontend::domain::value_objects::VersionConstraint;

/// Records every call as a short line such as `group remote` or
/// `release-ignore foo.sh`. Nothing is validated.
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    pub options: BuilderOptions,
    pub calls: Vec<String>,
}

impl RecordingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls starting with `prefix`.
    pub fn calls_to(&self, prefix: &str) -> Vec<&str> {
        self.calls
            .iter()
            .map(String::as_str)
            .filter(|call| call.split(' ').next() == Some(prefix))
            .collect()
    }

    fn record(&mut self, call: String) {
        self.calls.push(call);
    }
}

impl DescriptorBuilder for RecordingBuilder {
    fn options(&self) -> &BuilderOptions {
        &self.options
    }

    fn set_options(&mut self, options: BuilderOptions, merge: bool) -> BuilderResult {
        if merge {
            self.options.merge(options);
        } else {
            self.options = options;
        }
        Ok(())
    }

    fn set_package_file(&mut self, path: &str) {
        self.record(format!("package-file {}", path));
    }

    fn clear_deps(&mut self) {
        self.record("clear-deps".to_string());
    }

    fn clear_contents(&mut self) {
        self.record("clear-contents".to_string());
    }

    fn set_installer_dep(&mut self, _constraint: &VersionConstraint) -> BuilderResult {
        self.record("installer".to_string());
        Ok(())
    }

    fn set_runtime_dep(&mut self, _constraint: &VersionConstraint) -> BuilderResult {
        self.record("runtime".to_string());
        Ok(())
    }

    fn set_channel(&mut self, channel: &str) {
        self.record(format!("channel {}", channel));
    }

    fn set_package(&mut self, name: &str) {
        self.record(format!("package {}", name));
    }

    fn set_package_type(&mut self, package_type: &str) -> BuilderResult {
        self.record(format!("type {}", package_type));
        Ok(())
    }

    fn set_summary(&mut self, _summary: &str) {}

    fn set_description(&mut self, _description: &str) {}

    fn set_license(&mut self, content: &str, _uri: Option<&str>) {
        self.record(format!("license {}", content));
    }

    fn add_release(&mut self) {
        self.record("release".to_string());
    }

    fn set_api_version(&mut self, _version: &str) {}

    fn set_api_stability(&mut self, _stability: &str) -> BuilderResult {
        Ok(())
    }

    fn set_release_version(&mut self, version: &str) {
        self.record(format!("version {}", version));
    }

    fn set_release_stability(&mut self, _stability: &str) -> BuilderResult {
        Ok(())
    }

    fn set_notes(&mut self, _notes: &str) {}

    fn add_package_dep(
        &mut self,
        requirement: Requirement,
        _kind: PackageKind,
        name: &str,
        _channel: &str,
        _constraint: &VersionConstraint,
    ) -> BuilderResult {
        self.record(format!("dep {} {}", requirement.as_str(), name));
        Ok(())
    }

    fn add_extension_dep(
        &mut self,
        requirement: Requirement,
        name: &str,
        _constraint: &VersionConstraint,
    ) -> BuilderResult {
        self.record(format!("dep {} {}", requirement.as_str(), name));
        Ok(())
    }

    fn add_dependency_group(&mut self, name: &str, _hint: &str) -> BuilderResult {
        self.record(format!("group {}", name));
        Ok(())
    }

    fn add_group_package_dep(
        &mut self,
        _kind: PackageKind,
        group: &str,
        name: &str,
        _channel: &str,
        _constraint: &VersionConstraint,
    ) -> BuilderResult {
        self.record(format!("group-dep {} {}", group, name));
        Ok(())
    }

    fn add_group_extension_dep(
        &mut self,
        group: &str,
        name: &str,
        _constraint: &VersionConstraint,
    ) -> BuilderResult {
        self.record(format!("group-dep {} {}", group, name));
        Ok(())
    }

    fn deps(&self) -> NestedDependencies {
        NestedDependencies::default()
    }

    fn add_ignore(&mut self, path: &str) {
        self.record(format!("ignore {}", path));
    }

    fn add_windows_eol(&mut self, path: &str) {
        self.record(format!("eol-windows {}", path));
    }

    fn add_unix_eol(&mut self, path: &str) {
        self.record(format!("eol-unix {}", path));
    }

    fn add_install_as(&mut self, path: &str, install_as: &str) {
        self.record(format!("install-as {} {}", path, install_as));
    }

    fn add_replacement(&mut self, path: &str, kind: &str, from: &str, to: &str) -> BuilderResult {
        self.record(format!("replace {} {} {} {}", path, kind, from, to));
        Ok(())
    }

    fn set_os_install_condition(&mut self, os: &str) {
        self.record(format!("os {}", os));
    }

    fn add_ignore_to_release(&mut self, path: &str) {
        self.record(format!("release-ignore {}", path));
    }

    fn file_list(&self) -> Vec<ContentEntry> {
        Vec::new()
    }

    fn maintainers(&self) -> Vec<Maintainer> {
        Vec::new()
    }

    fn add_maintainer(&mut self, maintainer: Maintainer) -> BuilderResult {
        self.record(format!("maintainer {}", maintainer.handle));
        Ok(())
    }

    fn delete_maintainer(&mut self, _handle: &str) -> bool {
        false
    }

    fn metadata(&self) -> PackageMetadata {
        PackageMetadata::default()
    }

    fn generate_contents(&mut self, generator: &dyn TreeGenerator) -> BuilderResult {
        self.record(format!("generate {}", generator.name()));
        Ok(())
    }

    fn validation_warnings(&mut self) -> Vec<BuilderWarning> {
        Vec::new()
    }

    fn write_package_file(&mut self, preview: bool) -> BuilderResult<WriteOutcome> {
        self.record(format!("write preview={}", preview));
        Ok(WriteOutcome::Preview(String::new()))
    }

    fn export_legacy_package_file(&mut self) -> BuilderResult<PathBuf> {
        self.record("export-legacy".to_string());
        Ok(PathBuf::from("package-v1.json"))
    }
}
