//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `descriptor/` - JSON manifest builder and factory
//! - `generators/` - Tree generators (File, Git)
//! - `session/` - Session stores (memory, file)
//! - `preferences/` - Preference document store
//! - `fs/` - Atomic file replacement

pub mod descriptor;
pub mod fs;
pub mod generators;
pub mod preferences;
pub mod session;

// Re-export for convenience
pub use descriptor::{JsonDescriptorBuilder, JsonDescriptorFactory, PackageManifest};
pub use generators::{builtin_registry, FileGenerator, GitGenerator};
pub use preferences::FilePreferenceStore;
pub use session::{default_session_dir, FileSessionStore, MemorySessionStore};
