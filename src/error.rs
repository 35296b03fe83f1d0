//! Error types for the package file frontend
//!
//! Uses `thiserror` for library errors. Port-specific errors live next to
//! their trait and convert into [`FrontendError`].

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{BuilderWarning, GeneratorError, SessionError};

/// Result type alias for frontend operations
pub type FrontendResult<T> = Result<T, FrontendError>;

/// Main error type for frontend operations
#[derive(Error, Debug)]
pub enum FrontendError {
    /// No tree generator registered under this name
    #[error("no such file list generator \"{name}\"")]
    NoSuchGenerator { name: String },

    /// Tree generator failed while enumerating the package directory
    #[error("file list generator failed: {0}")]
    Generator(#[from] GeneratorError),

    /// Preferences could not be read or parsed
    #[error("loading preferences error: {message} ({source_name})")]
    PreferenceLoad {
        source_name: String,
        message: String,
    },

    /// Preferences could not be written
    #[error("saving preferences error: {message} ({})", .target.display())]
    PreferenceSave { target: PathBuf, message: String },

    /// Option name is not part of the preference set
    #[error("unknown option \"{option}\"")]
    UnknownOption { option: String },

    /// Option exists but the value has the wrong shape
    #[error("invalid value for option \"{option}\": {message}")]
    InvalidOptionValue { option: String, message: String },

    /// Maintainer category outside lead/developer/contributor/helper
    #[error("no such list of users \"{category}\"")]
    UnknownUserCategory { category: String },

    /// Maintainer handle not present in the package
    #[error("user \"{handle}\" does not exist")]
    UnknownUserHandle { handle: String },

    /// Maintainer role rejected by the descriptor
    #[error("invalid user role \"{role}\"; must be one of \"{valid}\"")]
    InvalidUserRole { role: String, valid: String },

    /// Page id or driver page name not known to this frontend
    #[error("unknown page \"{page}\"")]
    UnknownPage { page: String },

    /// File key not present in the session inventory
    #[error("no file with key {key} in the session inventory")]
    UnknownFile { key: u32 },

    /// Warning returned by the descriptor builder, surfaced as an error
    #[error("descriptor builder: {0}")]
    Builder(BuilderWarning),

    /// Session store failure
    #[error("session store: {0}")]
    Session(#[from] SessionError),

    /// Build finished with error-severity diagnostics on the stack
    #[error("package file build failed with {errors} error(s); see diagnostics")]
    BuildFailed { errors: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrontendError {
    /// Stable identifier used when the error is recorded as a diagnostic.
    pub fn code(&self) -> &'static str {
        match self {
            FrontendError::NoSuchGenerator { .. } => "no_such_generator",
            FrontendError::Generator(_) => "generator",
            FrontendError::PreferenceLoad { .. } => "preference_load",
            FrontendError::PreferenceSave { .. } => "preference_save",
            FrontendError::UnknownOption { .. } => "unknown_option",
            FrontendError::InvalidOptionValue { .. } => "invalid_option_value",
            FrontendError::UnknownUserCategory { .. } => "unknown_user_category",
            FrontendError::UnknownUserHandle { .. } => "unknown_user_handle",
            FrontendError::InvalidUserRole { .. } => "invalid_user_role",
            FrontendError::UnknownPage { .. } => "unknown_page",
            FrontendError::UnknownFile { .. } => "unknown_file",
            FrontendError::Builder(_) => "builder",
            FrontendError::Session(_) => "session",
            FrontendError::BuildFailed { .. } => "build_failed",
            FrontendError::Io(_) => "io",
        }
    }
}

impl From<BuilderWarning> for FrontendError {
    fn from(warning: BuilderWarning) -> Self {
        FrontendError::Builder(warning)
    }
}
