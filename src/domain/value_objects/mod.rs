//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod one_or_many;
mod page;
mod platform;
mod severity;
mod version_constraint;

pub use one_or_many::OneOrMany;
pub use page::{Page, PageNames};
pub use platform::{LineEnding, Platform};
pub use severity::Severity;
pub(crate) use version_constraint::lenient_version;
pub use version_constraint::VersionConstraint;
