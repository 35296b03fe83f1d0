//! Platform and line ending value objects for per-file packaging directives

use serde::{Deserialize, Serialize};

/// Restricts a file to one platform-specific release variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    None,
    Windows,
    /// Any unix-like system
    #[serde(alias = "(*ix|*ux)")]
    Unix,
}

impl Platform {
    pub fn is_none(&self) -> bool {
        matches!(self, Platform::None)
    }
}

/// Forced line-ending conversion at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    None,
    Windows,
    Unix,
}

impl LineEnding {
    pub fn is_none(&self) -> bool {
        matches!(self, LineEnding::None)
    }
}
