//! Domain Entities
//!
//! Data the session accumulates and the aggregator reasons about.
//! - `FileRecord` / `FileInventory` - per-path packaging directives
//! - `DependencyRecord` - one flat dependency row, plus the nested tree form
//! - `RoleRule` - one row of the resolved role table
//! - `SessionState` - the per-session bag persisted between requests

mod dependency;
mod file_record;
mod maintainer;
mod role_rule;
mod session;

pub use dependency::{
    DependencyGroup, DependencyKind, DependencyRecord, DependencySet, DependencyTarget,
    NestedDependencies, NestedDependency, NestedGroup, PackageKind, Placement, Requirement,
};
pub use file_record::{FileFilter, FileInventory, FileRecord, Replacement};
pub use maintainer::{Maintainer, MaintainerRole};
pub use role_rule::RoleRule;
pub use session::{DefaultSnapshots, PageFields, SessionState};
