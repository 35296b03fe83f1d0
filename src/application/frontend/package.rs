//! Package open/import, page defaults and maintainers

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::assemble::{LicenseField, PackagePage, ReleasePage};
use crate::domain::entities::{
    DependencyRecord, FileInventory, FileRecord, Maintainer, MaintainerRole,
};
use crate::domain::ports::{
    BuilderOptions, BuilderWarning, DescriptorBuilder, DescriptorFactory, SessionStore,
    DEFAULT_PACKAGE_FILE,
};
use crate::domain::services::{
    flatten, narrowed_constraint, normalize_generator_name, with_trailing_slash, RoleResolver,
};
use crate::domain::value_objects::{Page, Severity, VersionConstraint};
use crate::error::{FrontendError, FrontendResult};

use super::{Builder, Frontend};

const NEW_PACKAGE_TYPE: &str = "php";
const NEW_PACKAGE_CHANNEL: &str = "pear.php.net";
const NEW_INSTALLER_MIN: &str = "1.4.3";
const NEW_RUNTIME_MIN: &str = "4.2.0";

/// Defaults offered for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageDefaults {
    Package(PackagePage),
    Release(ReleasePage),
    /// Whether the descriptor lists any maintainer
    Maintainers(bool),
    Dependencies(Vec<DependencyRecord>),
    /// Inventory rebuilt from the descriptor's existing contents
    Replacements(FileInventory),
}

/// Where the package lives and which manifest to read.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PackageLocation {
    /// Forward slashes, trailing `/`
    directory: String,
    package_file: String,
    path_to_package_file: Option<String>,
    /// Manifest to import, `None` for a new package
    import_from: Option<PathBuf>,
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn canonical(path: &Path) -> Option<PathBuf> {
    std::fs::canonicalize(path).ok()
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

pub(super) fn missing_descriptor() -> FrontendError {
    FrontendError::Builder(BuilderWarning::error("no package descriptor in session"))
}

/// Resolve the package directory and manifest from the frontend options.
///
/// A package directory naming a file is split into directory and file name.
fn locate(package_directory: Option<&Path>, package_file: Option<&Path>) -> FrontendResult<PackageLocation> {
    let package_file = package_file.and_then(canonical);
    let path_to_package_file = package_file
        .as_deref()
        .and_then(Path::parent)
        .map(|p| with_trailing_slash(&slashed(p)));
    let named_file = package_file
        .as_deref()
        .filter(|p| p.is_file())
        .and_then(file_name);

    let Some(dir) = package_directory.and_then(canonical) else {
        let cwd = std::env::current_dir()?;
        let cwd = canonical(&cwd).unwrap_or(cwd);
        return Ok(PackageLocation {
            directory: with_trailing_slash(&slashed(&cwd)),
            package_file: named_file.unwrap_or_else(|| DEFAULT_PACKAGE_FILE.to_string()),
            path_to_package_file,
            import_from: None,
        });
    };

    let (directory, default_file) = if dir.is_file() {
        let parent = dir.parent().map(Path::to_path_buf).unwrap_or_default();
        (parent, file_name(&dir))
    } else {
        (dir, None)
    };
    let manifest_name = default_file
        .or(named_file)
        .unwrap_or_else(|| DEFAULT_PACKAGE_FILE.to_string());
    let import_from = match package_file.filter(|p| p.is_file()) {
        Some(file) => file,
        None => directory.join(&manifest_name),
    };

    Ok(PackageLocation {
        directory: with_trailing_slash(&slashed(&directory)),
        package_file: manifest_name,
        path_to_package_file,
        import_from: Some(import_from),
    })
}

impl<F, S> Frontend<F, S>
where
    F: DescriptorFactory,
    S: SessionStore,
{
    /// Open the session's package descriptor if it is not open yet.
    ///
    /// An existing manifest is imported; a missing one starts a new package.
    /// An import failure is recorded as a warning and also starts a new
    /// package.
    pub fn ensure_package(&mut self) -> FrontendResult<()> {
        if self.state.descriptor().is_some() {
            return Ok(());
        }

        let location = locate(
            self.options.package_directory.as_deref(),
            self.options.path_to_package_file.as_deref(),
        )?;
        let options = self.builder_options(&location);

        let imported = match location.import_from.as_deref().filter(|p| p.is_file()) {
            Some(path) => match self.factory.import(path, options.clone()) {
                Ok(mut builder) => {
                    builder.set_package_file(&slashed(path));
                    info!(path = %path.display(), "imported package file");
                    Some(builder)
                }
                Err(warning) => {
                    self.diagnostics.push(
                        Severity::Warning,
                        "import",
                        format!("cannot import {}: {}", path.display(), warning.message),
                    );
                    None
                }
            },
            None => None,
        };

        let is_new = imported.is_none();
        let builder = match imported {
            Some(builder) => builder,
            None => self.new_package(options, &location),
        };
        debug!(
            directory = %location.directory,
            package_file = %location.package_file,
            new_package = is_new,
            "package opened"
        );
        self.state.set_descriptor(builder, is_new);
        Ok(())
    }

    fn builder_options(&self, location: &PackageLocation) -> BuilderOptions {
        let prefs = &self.preferences;
        BuilderOptions {
            output_directory: prefs
                .output_directory
                .as_deref()
                .map(|dir| with_trailing_slash(&slashed(dir))),
            package_file: location.package_file.clone(),
            package_directory: location.directory.clone(),
            path_to_package_file: location.path_to_package_file.clone(),
            base_install_dir: prefs.base_install_dir.clone(),
            filelist_generator: normalize_generator_name(&prefs.filelist_generator),
            clear_contents: location.import_from.is_none(),
            roles: prefs.roles.clone(),
            dir_roles: prefs.dir_roles.clone(),
            exceptions: BTreeMap::new(),
            changelog_old_to_new: prefs.changelog_old_to_new,
            simple_output: prefs.simple_output,
        }
    }

    fn new_package(&mut self, options: BuilderOptions, location: &PackageLocation) -> Builder<F> {
        let mut builder = self.factory.create(options);
        let results = [
            builder.set_package_type(NEW_PACKAGE_TYPE),
            builder.set_installer_dep(&VersionConstraint::min(NEW_INSTALLER_MIN)),
        ];
        builder.set_channel(NEW_PACKAGE_CHANNEL);
        for warning in results.into_iter().filter_map(Result::err) {
            self.diagnostics.push_warning(&warning);
        }
        builder.set_package_file(&format!("{}{}", location.directory, location.package_file));
        info!(directory = %location.directory, "created new package");
        builder
    }

    /// Open the package and borrow its descriptor.
    pub(super) fn builder_mut(&mut self) -> FrontendResult<&mut Builder<F>> {
        self.ensure_package()?;
        self.state.descriptor_mut().ok_or_else(missing_descriptor)
    }

    pub fn is_new_package(&mut self) -> FrontendResult<bool> {
        self.ensure_package()?;
        Ok(self.state.is_new_package())
    }

    /// Builder options of the open package.
    pub fn package_options(&mut self) -> FrontendResult<BuilderOptions> {
        Ok(self.builder_mut()?.options().clone())
    }

    // === Page defaults ===

    /// Defaults for `page` (id like `page2` or category like `release`).
    ///
    /// Pages past `replacements` carry no defaults.
    pub fn defaults(&mut self, page: &str) -> FrontendResult<Option<PageDefaults>> {
        let Some(page) = Page::parse(page) else {
            let err = FrontendError::UnknownPage {
                page: page.to_string(),
            };
            return self.diagnostics.record(Severity::Error, Err(err));
        };
        self.ensure_package()?;

        let defaults = match page {
            Page::Package => Some(PageDefaults::Package(self.package_defaults()?)),
            Page::Release => Some(PageDefaults::Release(self.release_defaults()?)),
            Page::Maintainers => {
                let builder = self.state.descriptor().ok_or_else(missing_descriptor)?;
                Some(PageDefaults::Maintainers(!builder.maintainers().is_empty()))
            }
            Page::Dependencies => Some(PageDefaults::Dependencies(self.load_dependencies()?)),
            Page::Replacements => Some(PageDefaults::Replacements(self.import_replacements()?)),
            Page::Files | Page::Roles | Page::Options => None,
        };
        debug!(page = %page, found = defaults.is_some(), "page defaults");
        Ok(defaults)
    }

    fn package_defaults(&mut self) -> FrontendResult<PackagePage> {
        let is_new = self.state.is_new_package();
        let builder = self.state.descriptor().ok_or_else(missing_descriptor)?;
        let options = builder.options();
        let metadata = builder.metadata();

        let (installer, runtime) = if is_new {
            (
                VersionConstraint::min(NEW_INSTALLER_MIN),
                VersionConstraint::min(NEW_RUNTIME_MIN),
            )
        } else {
            let deps = builder.deps();
            (
                deps.installer.as_ref().map(narrowed_constraint).unwrap_or_default(),
                deps.runtime.as_ref().map(narrowed_constraint).unwrap_or_default(),
            )
        };

        Ok(PackagePage {
            package_output_dir: self
                .preferences
                .output_directory
                .as_deref()
                .map(slashed),
            package_file_name: Some(options.package_file.clone()),
            package_dir: Some(options.package_directory.clone()),
            base_install_dir: Some(self.preferences.base_install_dir.clone()),
            pear_installer: installer,
            php_version: runtime,
            package_type: non_empty(metadata.package_type),
            channel: non_empty(metadata.channel),
            package_name: non_empty(metadata.name),
            package_summary: non_empty(metadata.summary),
            package_description: non_empty(metadata.description),
        })
    }

    fn release_defaults(&mut self) -> FrontendResult<ReleasePage> {
        let is_new = self.state.is_new_package();
        let builder = self.state.descriptor().ok_or_else(missing_descriptor)?;
        let metadata = builder.metadata();
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let license = LicenseField {
            content: metadata.license.content,
            uri: metadata.license.uri.and_then(non_empty),
        };

        if is_new {
            return Ok(ReleasePage {
                release_date: Some(today),
                release_license: license,
                ..ReleasePage::default()
            });
        }
        Ok(ReleasePage {
            release_license: license,
            release_state: non_empty(metadata.release_stability),
            release_version: non_empty(metadata.release_version),
            api_state: non_empty(metadata.api_stability),
            api_version: non_empty(metadata.api_version),
            release_date: metadata.date.and_then(non_empty).or(Some(today)),
            release_notes: non_empty(metadata.notes),
        })
    }

    /// Flatten the descriptor's dependencies into the session list.
    fn load_dependencies(&mut self) -> FrontendResult<Vec<DependencyRecord>> {
        let records = if self.state.is_new_package() {
            Vec::new()
        } else {
            let builder = self.state.descriptor().ok_or_else(missing_descriptor)?;
            flatten(&builder.deps())
        };
        self.state.set_dependencies(records.clone());
        Ok(records)
    }

    /// Rebuild the inventory from the descriptor's contents section, keeping
    /// roles and replace tasks. The first import is kept as the files
    /// snapshot.
    fn import_replacements(&mut self) -> FrontendResult<FileInventory> {
        let builder = self.state.descriptor().ok_or_else(missing_descriptor)?;
        let entries = builder.file_list();
        if entries.is_empty() {
            return Ok(self.state.files().cloned().unwrap_or_default());
        }
        let package_dir = builder.options().package_directory.clone();

        let resolver = RoleResolver::new(&self.preferences.dir_roles, &self.preferences.roles);
        let mut inventory = FileInventory::new();
        for entry in entries {
            let role = entry
                .role
                .and_then(non_empty)
                .unwrap_or_else(|| resolver.role_for(&entry.path).to_string());
            let record = FileRecord {
                role,
                replacements: entry.replacements,
                ..FileRecord::default()
            };
            inventory.push(format!("{}{}", package_dir, entry.path), record);
        }

        debug!(files = inventory.len(), "imported file replacements");
        self.state.set_files(inventory.clone());
        let snapshots = self.state.snapshots_mut();
        if snapshots.files.is_none() {
            snapshots.files = Some(inventory.clone());
        }
        Ok(inventory)
    }

    // === Maintainers ===

    /// Maintainers of the package, optionally only those of one role.
    pub fn maintainers(&mut self, category: Option<&str>) -> FrontendResult<Vec<Maintainer>> {
        let role = match category {
            None => None,
            Some(category) => match MaintainerRole::parse(category) {
                Some(role) => Some(role),
                None => {
                    let err = FrontendError::UnknownUserCategory {
                        category: category.to_string(),
                    };
                    return self.diagnostics.record(Severity::Error, Err(err));
                }
            },
        };

        let maintainers = self.builder_mut()?.maintainers();
        Ok(maintainers
            .into_iter()
            .filter(|m| role.map_or(true, |r| m.role == r))
            .collect())
    }

    pub fn add_maintainer(
        &mut self,
        role: &str,
        handle: &str,
        name: &str,
        email: &str,
        active: bool,
    ) -> FrontendResult<()> {
        let Some(parsed) = MaintainerRole::parse(role) else {
            let err = FrontendError::InvalidUserRole {
                role: role.to_string(),
                valid: MaintainerRole::valid_list(),
            };
            return self.diagnostics.record(Severity::Error, Err(err));
        };
        let mut maintainer = Maintainer::new(parsed, handle, name, email);
        maintainer.active = active;

        let result = self.builder_mut()?.add_maintainer(maintainer);
        self.diagnostics
            .record(Severity::Error, result.map_err(FrontendError::from))
    }

    pub fn delete_maintainer(&mut self, handle: &str) -> FrontendResult<()> {
        if self.builder_mut()?.delete_maintainer(handle) {
            return Ok(());
        }
        let err = FrontendError::UnknownUserHandle {
            handle: handle.to_string(),
        };
        self.diagnostics.record(Severity::Error, Err(err))
    }
}
