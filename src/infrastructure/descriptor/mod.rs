//! JSON package descriptor
//!
//! - `manifest` - the on-disk document model
//! - `json_builder` - the builder port implementation and its factory

mod json_builder;
mod manifest;

pub use json_builder::{
    JsonDescriptorBuilder, JsonDescriptorFactory, PACKAGE_TYPES, REPLACEMENT_TYPES, STABILITIES,
};
pub use manifest::{
    ChangelogEntry, ContentFile, Contents, LegacyManifest, PackageManifest, ReleaseEntry,
    VersionPair, LEGACY_MANIFEST_VERSION, MANIFEST_VERSION,
};
