//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `Frontend` - One editing session: preferences, page values, lists and builds
//! - `ManifestAssembler` - Replays a session into descriptor builder calls
//!
//! ## Services
//!
//! - `ErrorStack` - Diagnostics collected across the calls of one request

pub mod assemble;
pub mod diagnostics;
pub mod frontend;

pub use assemble::{AssemblyReport, BuildOptions, BuildReport, ManifestAssembler};
pub use diagnostics::{Diagnostic, ErrorStack};
pub use frontend::{
    DefaultSnapshot, FileEntry, FileListing, Frontend, FrontendOptions, PageDefaults,
};
