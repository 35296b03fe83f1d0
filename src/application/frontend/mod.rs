//! Frontend handle
//!
//! One explicit value per editing session. It owns the session state loaded
//! from the session store, the effective preferences and the diagnostics
//! stack, and exposes the operations a driver (CLI, web form, ...) calls
//! between requests:
//! - `session` - open / save / reset, preferences and options
//! - `package` - descriptor open or import, page defaults, maintainers
//! - `lists` - file, dependency and role lists plus default snapshots
//! - `pages` - submitted page values
//! - `build` - manifest assembly

mod build;
mod lists;
mod options;
mod package;
mod pages;
mod session;

pub use lists::{DefaultSnapshot, FileEntry, FileListing};
pub use options::FrontendOptions;
pub use package::PageDefaults;

use crate::application::diagnostics::ErrorStack;
use crate::config::Preferences;
use crate::domain::entities::SessionState;
use crate::domain::ports::{DescriptorFactory, SessionKey, SessionStore};
use crate::domain::services::GeneratorRegistry;

type Builder<F> = <F as DescriptorFactory>::Builder;

pub struct Frontend<F, S>
where
    F: DescriptorFactory,
    S: SessionStore,
{
    options: FrontendOptions,
    preferences: Preferences,
    factory: F,
    store: S,
    generators: GeneratorRegistry,
    key: SessionKey,
    state: SessionState<Builder<F>>,
    diagnostics: ErrorStack,
}
