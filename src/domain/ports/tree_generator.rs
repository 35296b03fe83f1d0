//! TreeGenerator port
//!
//! Enumerates the files of a package directory. Implementations are
//! registered by name and must return the same ordered list for an unchanged
//! filesystem.

use std::path::{Path, PathBuf};

pub trait TreeGenerator: Send + Sync {
    /// Registry name, already case-normalized (`File`, `Git`).
    fn name(&self) -> &str;

    /// Paths of every packaged file under `root`, relative to it, using `/`
    /// as separator.
    fn enumerate(&self, root: &Path) -> Result<Vec<String>, GeneratorError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("package directory does not exist: {}", .path.display())]
    MissingRoot { path: PathBuf },

    #[error("failed to list {}: {message}", .path.display())]
    AccessError { path: PathBuf, message: String },
}
