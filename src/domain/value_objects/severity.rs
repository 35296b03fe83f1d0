//! Severity value object - how serious a diagnostic or builder warning is

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic, ordered from least to most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Notice,
    Warning,
    Error,
    Exception,
}

impl Severity {
    /// Error-severity means `Error` or anything above it.
    pub fn is_error(&self) -> bool {
        *self >= Severity::Error
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Exception => "exception",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
