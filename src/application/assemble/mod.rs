//! Manifest Assembler
//!
//! Replays an editing session into descriptor builder calls.
//!
//! Assembly is always a full rebuild: the identity stage clears the
//! builder's dependencies and contents before anything is re-added. Stages
//! run in a fixed order (identity, release, dependencies, files, roles and
//! output flags) and a warning from one call never stops the ones after it.

mod options;
mod pages;
mod result;
mod use_case;

pub use options::BuildOptions;
pub use pages::{
    read_page, to_fields, LicenseField, OptionsPage, PackagePage, ReleasePage, ReplacementsPage,
};
pub use result::{AssemblyReport, BuildReport};
pub use use_case::ManifestAssembler;
