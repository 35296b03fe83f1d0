//! Subcommand implementations
//!
//! Every command opens the session named on the command line, runs one
//! frontend operation, saves the session and prints what the diagnostics
//! stack collected.

mod build;
mod edit;
mod inspect;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;

use pkgfile_frontend::config::default_preferences_path;
use pkgfile_frontend::domain::ports::PreferenceSource;
use pkgfile_frontend::{
    builtin_registry, FilePreferenceStore, FileSessionStore, Frontend, FrontendOptions,
    JsonDescriptorFactory, Preferences,
};

use crate::cli::Cli;

pub use build::cmd_build;
pub use edit::{cmd_add_maintainer, cmd_preference, cmd_remove_maintainer, cmd_reset, cmd_set};
pub use inspect::{cmd_deps, cmd_files, cmd_info, cmd_maintainers, cmd_roles};

pub type CliFrontend = Frontend<JsonDescriptorFactory, FileSessionStore>;

/// Open the session and load preferences.
pub fn open(cli: &Cli) -> Result<CliFrontend> {
    let mut options = FrontendOptions::default();
    options.session_id = cli.session.clone();
    options.package_directory = cli.package_dir.clone();
    options.path_to_package_file = cli.package_file.clone();

    let store = match &cli.session_dir {
        Some(dir) => FileSessionStore::with_dir(dir),
        None => FileSessionStore::new(),
    };
    let mut frontend = Frontend::open(
        options,
        Preferences::default(),
        JsonDescriptorFactory,
        store,
        builtin_registry(),
    )?;
    let source = preference_source(cli.preferences.as_deref());
    frontend.load_preferences(&FilePreferenceStore, &source)?;
    Ok(frontend)
}

/// Explicit document, else the default one if it exists, else defaults.
fn preference_source(explicit: Option<&Path>) -> PreferenceSource {
    if let Some(path) = explicit {
        return PreferenceSource::File(path.to_path_buf());
    }
    match default_preferences_path() {
        Some(path) if path.is_file() => PreferenceSource::File(path),
        _ => PreferenceSource::Defaults,
    }
}

/// Where `preference --save` writes.
fn preference_target(cli: &Cli) -> Option<PathBuf> {
    cli.preferences.clone().or_else(default_preferences_path)
}

/// Save the session and print the collected diagnostics.
pub fn finish(frontend: &mut CliFrontend, json: bool) -> Result<()> {
    frontend.save()?;
    report_diagnostics(frontend, json)
}

fn report_diagnostics(frontend: &mut CliFrontend, json: bool) -> Result<()> {
    for diagnostic in frontend.errors(true) {
        if json {
            emit(serde_json::json!({
                "event": "diagnostic",
                "severity": diagnostic.severity,
                "code": diagnostic.code,
                "message": diagnostic.message,
            }))?;
        } else {
            eprintln!("{}", diagnostic);
        }
    }
    Ok(())
}

/// One JSON event per line on stdout.
fn emit(value: Value) -> Result<()> {
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}
