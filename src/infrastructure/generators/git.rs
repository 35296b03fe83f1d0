//! Listing filtered through the package's ignore files

use std::path::Path;

use ignore::WalkBuilder;
use tracing::debug;

use crate::domain::ports::{GeneratorError, TreeGenerator};

use super::{check_root, collect, is_vcs_dir};

#[derive(Debug, Clone, Copy, Default)]
pub struct GitGenerator;

impl TreeGenerator for GitGenerator {
    fn name(&self) -> &str {
        "Git"
    }

    fn enumerate(&self, root: &Path) -> Result<Vec<String>, GeneratorError> {
        check_root(root)?;
        let walk = WalkBuilder::new(root)
            .hidden(false)
            .parents(false)
            .ignore(true)
            .git_ignore(true)
            .git_exclude(true)
            .git_global(false)
            .require_git(false)
            .filter_entry(|entry| !is_vcs_dir(entry))
            .build();
        let paths = collect(root, walk)?;
        debug!(root = %root.display(), files = paths.len(), "listed tracked package tree");
        Ok(paths)
    }
}
