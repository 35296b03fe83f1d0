//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod descriptor_builder;
pub mod preference_store;
pub mod session_store;
pub mod tree_generator;

pub use descriptor_builder::{
    BuilderOptions, BuilderResult, BuilderWarning, ContentEntry, DescriptorBuilder,
    DescriptorFactory, License, PackageMetadata, WriteOutcome, DEFAULT_PACKAGE_FILE,
};
pub use preference_store::{LoadedPreferences, PreferenceFormat, PreferenceSource, PreferenceStore};
pub use session_store::{SessionError, SessionKey, SessionStore};
pub use tree_generator::{GeneratorError, TreeGenerator};
