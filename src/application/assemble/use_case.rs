//! Manifest assembly use case
//!
//! Drives a descriptor builder from the state of one session.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::domain::entities::SessionState;
use crate::domain::ports::{BuilderWarning, DescriptorBuilder, WriteOutcome};
use crate::domain::services::{relative_path, unflatten, with_trailing_slash, GeneratorRegistry};
use crate::domain::value_objects::{LineEnding, Page, PageNames, Platform};

use super::options::BuildOptions;
use super::pages::{read_page, text, OptionsPage, PackagePage, ReleasePage, ReplacementsPage};
use super::result::{AssemblyReport, BuildReport};

/// OS install condition of the first release when windows-only files exist.
const WINDOWS_OS: &str = "windows";

/// Assembles a manifest from session state.
///
/// Reads submitted page values through `pages` and never mutates the
/// session; everything is written to the builder passed to each call.
pub struct ManifestAssembler<'a, B> {
    state: &'a SessionState<B>,
    pages: &'a PageNames,
}

impl<'a, B> ManifestAssembler<'a, B>
where
    B: DescriptorBuilder,
{
    pub fn new(state: &'a SessionState<B>, pages: &'a PageNames) -> Self {
        Self { state, pages }
    }

    /// Run every stage against `builder`.
    pub fn prepare(&self, builder: &mut B) -> AssemblyReport {
        let mut report = AssemblyReport::new();

        self.identity_stage(builder, &mut report);
        self.release_stage(builder, &mut report);
        self.dependency_stage(builder, &mut report);
        self.generator_stage(builder, &mut report);
        self.file_stage(builder, &mut report);
        self.roles_stage(builder, &mut report);
        self.flags_stage(builder, &mut report);

        debug!(
            warnings = report.warnings.len(),
            errors = report.error_count(),
            releases = report.releases,
            "package file prepared"
        );
        report
    }

    /// Prepare, generate contents and serialize.
    ///
    /// The tree generator named in the builder options is looked up in
    /// `generators`. In preview mode nothing is written and the legacy export
    /// is skipped.
    pub fn build(
        &self,
        builder: &mut B,
        generators: &GeneratorRegistry,
        options: &BuildOptions,
    ) -> BuildReport {
        let mut assembly = self.prepare(builder);

        let mut builder_options = builder.options().clone();
        builder_options.changelog_old_to_new = options.changelog_old_to_new;
        builder_options.simple_output = options.simple_output;
        assembly.note(builder.set_options(builder_options, true));

        match generators.resolve(&builder.options().filelist_generator) {
            Ok(generator) => {
                assembly.note(builder.generate_contents(generator.as_ref()));
            }
            Err(e) => assembly.warn(BuilderWarning::error(e.to_string())),
        }
        let validation = builder.validation_warnings();
        debug!(warnings = validation.len(), "validation warnings collected");
        assembly.warnings.extend(validation);

        let legacy = if options.export_legacy && !options.preview {
            assembly.note(builder.export_legacy_package_file())
        } else {
            None
        };
        let outcome = assembly.note(builder.write_package_file(options.preview));

        match &outcome {
            Some(WriteOutcome::Written(path)) => {
                info!(path = %path.display(), "package file written")
            }
            Some(WriteOutcome::Preview(rendered)) => {
                info!(bytes = rendered.len(), "package file rendered for preview")
            }
            None => debug!("package file not serialized"),
        }

        BuildReport {
            assembly,
            legacy,
            outcome,
        }
    }

    fn page<T>(&self, page: Page, report: &mut AssemblyReport) -> T
    where
        T: DeserializeOwned + Default,
    {
        let name = self.pages.name(page);
        match read_page(self.state.values(name)) {
            Ok(values) => values,
            Err(e) => {
                report.warn(BuilderWarning::error(format!(
                    "unreadable values on page {}: {}",
                    name, e
                )));
                T::default()
            }
        }
    }

    fn identity_stage(&self, builder: &mut B, report: &mut AssemblyReport) {
        let page: PackagePage = self.page(Page::Package, report);

        let mut options = builder.options().clone();
        // A blank output directory writes next to the package sources.
        match page.package_output_dir.as_deref().map(str::trim) {
            Some("") => options.output_directory = None,
            Some(dir) => options.output_directory = Some(with_trailing_slash(dir)),
            None => {}
        }
        if let Some(file) = text(&page.package_file_name) {
            options.package_file = file.to_string();
        }
        if let Some(dir) = text(&page.package_dir) {
            options.package_directory = with_trailing_slash(dir);
        }
        if let Some(dir) = text(&page.base_install_dir) {
            options.base_install_dir = dir.to_string();
        }
        report.note(builder.set_options(options, true));

        builder.clear_deps();
        builder.clear_contents();

        report.note(builder.set_installer_dep(&page.pear_installer.normalized()));
        report.note(builder.set_runtime_dep(&page.php_version.normalized()));
        builder.set_channel(text(&page.channel).unwrap_or_default());
        builder.set_package(text(&page.package_name).unwrap_or_default());
        if let Some(package_type) = text(&page.package_type) {
            report.note(builder.set_package_type(package_type));
        }
        builder.set_summary(text(&page.package_summary).unwrap_or_default());
        builder.set_description(text(&page.package_description).unwrap_or_default());

        debug!(package = ?text(&page.package_name), "identity stage done");
    }

    fn release_stage(&self, builder: &mut B, report: &mut AssemblyReport) {
        let page: ReleasePage = self.page(Page::Release, report);

        let uri = text(&page.release_license.uri);
        builder.set_license(&page.release_license.content, uri);

        builder.add_release();
        report.releases = 1;

        builder.set_api_version(text(&page.api_version).unwrap_or_default());
        if let Some(state) = text(&page.api_state) {
            report.note(builder.set_api_stability(state));
        }
        builder.set_release_version(text(&page.release_version).unwrap_or_default());
        if let Some(state) = text(&page.release_state) {
            report.note(builder.set_release_stability(state));
        }
        builder.set_notes(text(&page.release_notes).unwrap_or_default());

        debug!(version = ?text(&page.release_version), "release stage done");
    }

    fn dependency_stage(&self, builder: &mut B, report: &mut AssemblyReport) {
        let Some(records) = self.state.dependencies() else {
            return;
        };
        for warning in unflatten(records, builder) {
            report.warn(warning);
        }
        debug!(dependencies = records.len(), "dependency stage done");
    }

    fn generator_stage(&self, builder: &mut B, report: &mut AssemblyReport) {
        let page: ReplacementsPage = self.page(Page::Replacements, report);
        if let Some(generator) = text(&page.filelistgenerator) {
            let mut options = builder.options().clone();
            options.filelist_generator = generator.to_string();
            report.note(builder.set_options(options, true));
        }
    }

    fn file_stage(&self, builder: &mut B, report: &mut AssemblyReport) {
        let Some(files) = self.state.files() else {
            return;
        };
        let package_dir = builder.options().package_directory.clone();

        let mut windows: Vec<&str> = Vec::new();
        let mut unix: Vec<&str> = Vec::new();

        for (_, record, full_path) in files.iter() {
            let path = relative_path(full_path, &package_dir);

            if record.ignore {
                builder.add_ignore(path);
            }
            match record.platform {
                Platform::Windows => windows.push(path),
                Platform::Unix => unix.push(path),
                Platform::None => {}
            }
            match record.eol {
                LineEnding::Windows => builder.add_windows_eol(path),
                LineEnding::Unix => builder.add_unix_eol(path),
                LineEnding::None => {}
            }
            let install_as = record.install_as.trim();
            if !install_as.is_empty() {
                builder.add_install_as(path, install_as);
            }
            for replacement in &record.replacements {
                report.note(builder.add_replacement(
                    path,
                    &replacement.kind,
                    &replacement.from,
                    &replacement.to,
                ));
            }
        }

        if !windows.is_empty() {
            builder.set_os_install_condition(WINDOWS_OS);
            for path in &windows {
                builder.add_ignore_to_release(path);
            }
        }
        if !unix.is_empty() {
            if !windows.is_empty() {
                builder.add_release();
                report.releases += 1;
            }
            for path in &unix {
                builder.add_ignore_to_release(path);
            }
        }

        debug!(
            files = files.len(),
            windows = windows.len(),
            unix = unix.len(),
            "file stage done"
        );
    }

    fn roles_stage(&self, builder: &mut B, report: &mut AssemblyReport) {
        let Some(files) = self.state.files() else {
            return;
        };
        let package_dir = builder.options().package_directory.clone();

        let exceptions: BTreeMap<String, String> = files
            .iter()
            .filter(|(_, record, _)| !record.role.trim().is_empty())
            .map(|(_, record, full_path)| {
                (
                    relative_path(full_path, &package_dir).to_string(),
                    record.role.trim().to_string(),
                )
            })
            .collect();

        debug!(exceptions = exceptions.len(), "role exceptions applied");
        let mut options = builder.options().clone();
        options.exceptions = exceptions;
        report.note(builder.set_options(options, false));
    }

    fn flags_stage(&self, builder: &mut B, report: &mut AssemblyReport) {
        let page: OptionsPage = self.page(Page::Options, report);

        let mut options = builder.options().clone();
        if let Some(flag) = page.changelog_old_to_new {
            options.changelog_old_to_new = flag;
        }
        if let Some(flag) = page.simple_output {
            options.simple_output = flag;
        }
        report.note(builder.set_options(options, true));
    }
}
