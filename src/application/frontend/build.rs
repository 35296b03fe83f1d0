//! Manifest assembly entry points

use tracing::info;

use crate::application::assemble::{
    read_page, AssemblyReport, BuildOptions, ManifestAssembler, OptionsPage,
};
use crate::domain::ports::{DescriptorFactory, SessionStore, WriteOutcome};
use crate::domain::value_objects::{Page, Severity};
use crate::error::{FrontendError, FrontendResult};

use super::package::missing_descriptor;
use super::Frontend;

impl<F, S> Frontend<F, S>
where
    F: DescriptorFactory,
    S: SessionStore,
{
    /// Build flags from the preferences, overridden by what was submitted on
    /// the options page.
    pub fn build_options(&self, preview: bool) -> BuildOptions {
        let page: OptionsPage =
            read_page(self.state.values(self.page_name(Page::Options))).unwrap_or_default();
        BuildOptions {
            preview,
            export_legacy: self.preferences.export_compatible_v1,
            changelog_old_to_new: page
                .changelog_old_to_new
                .unwrap_or(self.preferences.changelog_old_to_new),
            simple_output: page.simple_output.unwrap_or(self.preferences.simple_output),
        }
    }

    /// Replay the session into the descriptor without serializing it.
    /// Builder warnings are recorded as diagnostics.
    pub fn prepare_package_file(&mut self) -> FrontendResult<AssemblyReport> {
        self.ensure_package()?;
        let mut builder = self.state.take_descriptor().ok_or_else(missing_descriptor)?;
        let report = ManifestAssembler::new(&self.state, &self.options.page_names).prepare(&mut builder);
        self.state.put_descriptor(builder);

        for warning in &report.warnings {
            self.diagnostics.push_warning(warning);
        }
        Ok(report)
    }

    /// Assemble and serialize the manifest.
    ///
    /// Fails with [`FrontendError::BuildFailed`] when any error-severity
    /// diagnostic is on the stack afterwards; the diagnostics stay
    /// retrievable through [`Frontend::errors`].
    pub fn build_package_file(&mut self, options: &BuildOptions) -> FrontendResult<WriteOutcome> {
        self.ensure_package()?;
        let mut builder = self.state.take_descriptor().ok_or_else(missing_descriptor)?;
        let report = ManifestAssembler::new(&self.state, &self.options.page_names).build(
            &mut builder,
            &self.generators,
            options,
        );
        self.state.put_descriptor(builder);

        for warning in &report.assembly.warnings {
            self.diagnostics.push_warning(warning);
        }
        if let Some(legacy) = &report.legacy {
            self.diagnostics.push(
                Severity::Notice,
                "legacy_export",
                format!("legacy package file written to {}", legacy.display()),
            );
        }

        if self.diagnostics.has_errors(None) {
            let errors = self.diagnostics.error_count();
            info!(errors, "package file build failed");
            return Err(FrontendError::BuildFailed { errors });
        }
        report
            .outcome
            .ok_or(FrontendError::BuildFailed { errors: 0 })
    }
}
