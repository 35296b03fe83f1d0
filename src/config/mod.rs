//! Frontend preferences
//!
//! Resolution order:
//! 1. Environment variables (PKGFILE_*)
//! 2. Settings document (`[settings]` table of the preferences file)
//! 3. Built-in defaults (lowest priority)

mod flag;
mod loader;
mod types;

pub(crate) use flag::deserialize_opt_flag;
pub use flag::{parse_flag, FALSY, TRUTHY};
pub use loader::{
    default_preferences_path, parse_preferences, render_preferences, with_env_overrides,
    with_overrides_from, PreferencesWarning,
};
pub use types::{PreferenceOverrides, Preferences, OPTION_NAMES};
