//! File, dependency and role lists

use serde::Serialize;
use tracing::debug;

use crate::domain::entities::{
    DependencyRecord, FileFilter, FileInventory, FileRecord, Maintainer, RoleRule,
};
use crate::domain::ports::{DescriptorBuilder, DescriptorFactory, SessionStore};
use crate::domain::services::{materialize, relative_path, RoleResolver};
use crate::domain::value_objects::Severity;
use crate::error::{FrontendError, FrontendResult};

use super::package::missing_descriptor;
use super::Frontend;

/// One listed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Stable key for later edits
    pub key: u32,
    /// Relative to the package directory
    pub path: String,
    #[serde(flatten)]
    pub record: FileRecord,
}

/// Filtered view of the session inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileListing {
    pub files: Vec<FileEntry>,
    /// Size of the whole inventory
    pub total: usize,
}

impl FileListing {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, key: u32) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.key == key)
    }
}

/// Values kept for "reset to defaults". `None` snapshots the current
/// session value.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultSnapshot {
    Maintainers(Option<Vec<Maintainer>>),
    Dependencies(Option<Vec<DependencyRecord>>),
    Files(Option<FileInventory>),
    Roles(Option<Vec<RoleRule>>),
}

impl<F, S> Frontend<F, S>
where
    F: DescriptorFactory,
    S: SessionStore,
{
    // === Files ===

    /// Files accepted by `filter`, enumerating the package tree first if the
    /// session has no inventory yet. With `use_default` the files snapshot,
    /// when present, replaces the inventory.
    pub fn file_list(
        &mut self,
        use_default: bool,
        filter: FileFilter,
        generator: Option<&str>,
    ) -> FrontendResult<FileListing> {
        self.ensure_package()?;
        if self.state.files().is_none() {
            self.set_file_list(generator)?;
        }
        if use_default {
            if let Some(files) = self.state.snapshots().files.clone() {
                self.state.restore_files(files);
            }
        }

        let package_dir = self.package_directory()?;
        let inventory = self.state.files().cloned().unwrap_or_default();
        let files: Vec<FileEntry> = inventory
            .iter()
            .filter(|(_, record, _)| filter.accepts(record))
            .map(|(key, record, path)| FileEntry {
                key,
                path: relative_path(path, &package_dir).to_string(),
                record: record.clone(),
            })
            .collect();

        debug!(
            listed = files.len(),
            total = inventory.len(),
            filter = ?filter,
            "file list"
        );
        Ok(FileListing {
            files,
            total: inventory.len(),
        })
    }

    /// Re-enumerate the package tree with `generator` (the preferred one by
    /// default). Returns the number of files found.
    pub fn set_file_list(&mut self, generator: Option<&str>) -> FrontendResult<usize> {
        self.ensure_package()?;
        let name = generator
            .map(str::to_string)
            .unwrap_or_else(|| self.preferences.filelist_generator.clone());
        let result = materialize(&mut self.state, &self.generators, Some(&name));
        self.diagnostics.record(Severity::Error, result)
    }

    /// Selected files, the ones role exceptions are edited on.
    pub fn exception_list(&mut self) -> FrontendResult<FileListing> {
        self.file_list(false, FileFilter::Selected, None)
    }

    /// Edit one record in place.
    pub fn file_mut(&mut self, key: u32) -> FrontendResult<&mut FileRecord> {
        self.state
            .files_mut()
            .and_then(|files| files.get_mut(key))
            .ok_or(FrontendError::UnknownFile { key })
    }

    pub fn update_file(&mut self, key: u32, record: FileRecord) -> FrontendResult<()> {
        let result = self.file_mut(key).map(|slot| *slot = record);
        self.diagnostics.record(Severity::Error, result)
    }

    // === Dependencies ===

    /// Flat dependency list, flattened from the descriptor on first use.
    pub fn dep_list(&mut self, use_default: bool) -> FrontendResult<Vec<DependencyRecord>> {
        self.ensure_package()?;
        if self.state.dependencies().is_none() {
            self.defaults("dependencies")?;
        }
        if use_default {
            if let Some(deps) = self.state.snapshots().dependencies.clone() {
                self.state.set_dependencies(deps);
            }
        }
        Ok(self.state.dependencies().map(<[_]>::to_vec).unwrap_or_default())
    }

    pub fn set_dep_list(&mut self, records: Vec<DependencyRecord>) {
        self.state.set_dependencies(records);
    }

    // === Roles ===

    /// Role table derived from the inventory and the directory/extension
    /// preferences. Cached until the next enumeration.
    pub fn role_list(&mut self, use_default: bool) -> FrontendResult<Vec<RoleRule>> {
        if self.state.roles().is_none() {
            let listing = self.file_list(false, FileFilter::Selected, None)?;
            let resolver = RoleResolver::new(&self.preferences.dir_roles, &self.preferences.roles);
            let roles = resolver.resolve(listing.files.iter().map(|f| f.path.as_str()));
            debug!(rules = roles.len(), "role list resolved");
            self.state.set_roles(roles);
        }
        if use_default {
            if let Some(roles) = self.state.snapshots().roles.clone() {
                self.state.set_roles(roles);
            }
        }
        Ok(self.state.roles().map(<[_]>::to_vec).unwrap_or_default())
    }

    // === Snapshots ===

    /// Keep values for a later reset. An existing snapshot is only replaced
    /// with `overwrite`.
    pub fn set_defaults(&mut self, snapshot: DefaultSnapshot, overwrite: bool) -> FrontendResult<()> {
        match snapshot {
            DefaultSnapshot::Maintainers(values) => {
                if overwrite || self.state.snapshots().maintainers.is_none() {
                    let values = match values {
                        Some(values) => values,
                        None => self.builder_mut()?.maintainers(),
                    };
                    self.state.snapshots_mut().maintainers = Some(values);
                }
            }
            DefaultSnapshot::Dependencies(values) => {
                if overwrite || self.state.snapshots().dependencies.is_none() {
                    let values = values.or_else(|| self.state.dependencies().map(<[_]>::to_vec));
                    self.state.snapshots_mut().dependencies = values;
                }
            }
            DefaultSnapshot::Files(values) => {
                if overwrite || self.state.snapshots().files.is_none() {
                    let values = values.or_else(|| self.state.files().cloned());
                    self.state.snapshots_mut().files = values;
                }
            }
            DefaultSnapshot::Roles(values) => {
                if overwrite || self.state.snapshots().roles.is_none() {
                    let values = values.or_else(|| self.state.roles().map(<[_]>::to_vec));
                    self.state.snapshots_mut().roles = values;
                }
            }
        }
        Ok(())
    }

    fn package_directory(&self) -> FrontendResult<String> {
        let builder = self.state.descriptor().ok_or_else(missing_descriptor)?;
        Ok(builder.options().package_directory.clone())
    }
}
