//! Assembly result types

use std::path::PathBuf;

use crate::domain::ports::{BuilderResult, BuilderWarning, WriteOutcome};

/// Warnings collected while assembling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub warnings: Vec<BuilderWarning>,
    /// Release entries opened, the default one included
    pub releases: usize,
}

impl AssemblyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the warning of a failed builder call.
    pub fn note<T>(&mut self, result: BuilderResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(warning) => {
                self.warnings.push(warning);
                None
            }
        }
    }

    pub fn warn(&mut self, warning: BuilderWarning) {
        self.warnings.push(warning);
    }

    pub fn has_errors(&self) -> bool {
        self.warnings.iter().any(BuilderWarning::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_error()).count()
    }
}

/// Result of a build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub assembly: AssemblyReport,
    /// Legacy manifest written before the primary one
    pub legacy: Option<PathBuf>,
    /// `None` when serialization itself failed
    pub outcome: Option<WriteOutcome>,
}

impl BuildReport {
    pub fn has_errors(&self) -> bool {
        self.assembly.has_errors() || self.outcome.is_none()
    }
}
