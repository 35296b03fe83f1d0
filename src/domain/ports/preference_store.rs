//! PreferenceStore port
//!
//! Loads and saves the frontend preferences document.

use std::path::{Path, PathBuf};

use crate::config::{Preferences, PreferencesWarning};
use crate::error::FrontendResult;

/// Document syntax of a preferences source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceFormat {
    Toml,
    Yaml,
    Json,
}

impl PreferenceFormat {
    /// Guess from the file extension; anything unknown is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => PreferenceFormat::Yaml,
            Some("json") => PreferenceFormat::Json,
            _ => PreferenceFormat::Toml,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Some(PreferenceFormat::Toml),
            "yaml" | "yml" => Some(PreferenceFormat::Yaml),
            "json" => Some(PreferenceFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceSource {
    /// Built-in defaults, storage is not touched
    Defaults,
    File(PathBuf),
    Inline {
        format: PreferenceFormat,
        content: String,
    },
}

impl PreferenceSource {
    pub fn describe(&self) -> String {
        match self {
            PreferenceSource::Defaults => "defaults".to_string(),
            PreferenceSource::File(path) => path.display().to_string(),
            PreferenceSource::Inline { .. } => "inline document".to_string(),
        }
    }
}

/// Preferences plus the non-fatal findings of loading them.
#[derive(Debug, Clone, Default)]
pub struct LoadedPreferences {
    pub preferences: Preferences,
    pub warnings: Vec<PreferencesWarning>,
}

pub trait PreferenceStore: Send + Sync {
    fn load(&self, source: &PreferenceSource) -> FrontendResult<LoadedPreferences>;
    fn save(&self, target: &Path, preferences: &Preferences) -> FrontendResult<()>;
}
