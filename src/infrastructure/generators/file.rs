//! Plain directory listing

use std::path::Path;

use ignore::WalkBuilder;
use tracing::debug;

use crate::domain::ports::{GeneratorError, TreeGenerator};

use super::{check_root, collect, is_vcs_dir};

#[derive(Debug, Clone, Copy, Default)]
pub struct FileGenerator;

impl TreeGenerator for FileGenerator {
    fn name(&self) -> &str {
        "File"
    }

    fn enumerate(&self, root: &Path) -> Result<Vec<String>, GeneratorError> {
        check_root(root)?;
        let walk = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .filter_entry(|entry| !is_vcs_dir(entry))
            .build();
        let paths = collect(root, walk)?;
        debug!(root = %root.display(), files = paths.len(), "listed package tree");
        Ok(paths)
    }
}
