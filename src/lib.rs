//! pkgfile - session-driven package manifest frontend
//!
//! Collects package metadata page by page across requests (identity,
//! release, maintainers, dependencies, files, roles, output options), keeps
//! it in a session store between requests, and replays it into a descriptor
//! builder that writes the package manifest.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildOptions, Diagnostic, ErrorStack, Frontend, FrontendOptions};
pub use config::Preferences;
pub use domain::value_objects::{Page, PageNames, Severity};
pub use error::{FrontendError, FrontendResult};
pub use infrastructure::{
    builtin_registry, FilePreferenceStore, FileSessionStore, JsonDescriptorFactory,
    MemorySessionStore,
};
