//! Role rule entity - one row of the resolved role table

use serde::{Deserialize, Serialize};

/// Maps either a directory or a file extension to an install role.
///
/// Exactly one of `directory` / `extension` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRule {
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub extension: String,
    pub role: String,
}

impl RoleRule {
    pub fn for_directory(directory: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: String::new(),
            role: role.into(),
        }
    }

    pub fn for_extension(extension: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            directory: String::new(),
            extension: extension.into(),
            role: role.into(),
        }
    }

    pub fn is_directory_rule(&self) -> bool {
        !self.directory.is_empty()
    }
}
