//! Tree generators
//!
//! - `File` lists every regular file below the package directory, skipping
//!   version-control metadata directories.
//! - `Git` additionally honours `.gitignore`, `.ignore` and the repository's
//!   exclude file, so only what a checkout would track is packaged.

mod file;
mod git;

use std::path::Path;
use std::sync::Arc;

use ignore::{DirEntry, Walk};

use crate::domain::ports::GeneratorError;
use crate::domain::services::GeneratorRegistry;

pub use file::FileGenerator;
pub use git::GitGenerator;

/// Directories never packaged by any generator.
const VCS_DIRS: [&str; 5] = [".git", ".svn", "CVS", ".hg", ".bzr"];

/// Registry holding the generators shipped with this crate.
pub fn builtin_registry() -> GeneratorRegistry {
    GeneratorRegistry::new()
        .with_generator(Arc::new(FileGenerator))
        .with_generator(Arc::new(GitGenerator))
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| VCS_DIRS.contains(&name))
}

fn check_root(root: &Path) -> Result<(), GeneratorError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(GeneratorError::MissingRoot {
            path: root.to_path_buf(),
        })
    }
}

/// Drain `walk` into sorted, `/`-separated paths relative to `root`.
fn collect(root: &Path, walk: Walk) -> Result<Vec<String>, GeneratorError> {
    let mut paths = Vec::new();
    for entry in walk {
        let entry = entry.map_err(|e| GeneratorError::AccessError {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        paths.push(parts.join("/"));
    }
    paths.sort();
    Ok(paths)
}
