//! Diagnostics stack
//!
//! Recoverable failures are recorded here instead of aborting the session.
//! Callers check `has_errors` after an operation that reports overall
//! success only, such as a build.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::domain::ports::BuilderWarning;
use crate::domain::value_objects::Severity;
use crate::error::FrontendError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str(), self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorStack {
    entries: Vec<Diagnostic>,
}

impl ErrorStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, code: &str, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Notice => info!(code, %message, "diagnostic"),
            Severity::Warning => warn!(code, %message, "diagnostic"),
            Severity::Error | Severity::Exception => error!(code, %message, "diagnostic"),
        }
        self.entries.push(Diagnostic {
            severity,
            code: code.to_string(),
            message,
        });
    }

    pub fn push_error(&mut self, severity: Severity, err: &FrontendError) {
        self.push(severity, err.code(), err.to_string());
    }

    pub fn push_warning(&mut self, warning: &BuilderWarning) {
        self.push(warning.severity, "builder", warning.message.clone());
    }

    /// Record `result`'s error, if any, and pass the result through.
    pub fn record<T>(&mut self, severity: Severity, result: Result<T, FrontendError>) -> Result<T, FrontendError> {
        if let Err(err) = &result {
            self.push_error(severity, err);
        }
        result
    }

    /// With no level: any error-severity entry. With a level: any entry of
    /// exactly that severity.
    pub fn has_errors(&self, level: Option<Severity>) -> bool {
        match level {
            None => self.entries.iter().any(|d| d.severity.is_error()),
            Some(level) => self.entries.iter().any(|d| d.severity == level),
        }
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    /// All entries, oldest first. `purge` empties the stack.
    pub fn errors(&mut self, purge: bool) -> Vec<Diagnostic> {
        if purge {
            std::mem::take(&mut self.entries)
        } else {
            self.entries.clone()
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
