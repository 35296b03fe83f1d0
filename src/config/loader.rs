//! Preference loading and rendering

use std::fmt;
use std::path::PathBuf;

use tracing::warn;

use crate::domain::ports::{LoadedPreferences, PreferenceFormat};
use crate::error::{FrontendError, FrontendResult};

use super::flag::parse_flag;
use super::types::{Preferences, PreferencesDocument, PreferencesDocumentRef, OPTION_NAMES};

/// Non-fatal finding while loading preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferencesWarning {
    UnknownKey {
        key: String,
        source: String,
        line: Option<usize>,
        suggestion: Option<String>,
    },
    /// Nothing to read; defaults apply
    EmptyDocument { source: String },
}

impl fmt::Display for PreferencesWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferencesWarning::UnknownKey {
                key,
                source,
                line,
                suggestion,
            } => {
                write!(f, "unknown preference \"{}\" in {}", key, source)?;
                if let Some(line) = line {
                    write!(f, " (line {})", line)?;
                }
                if let Some(suggestion) = suggestion {
                    write!(f, "; did you mean \"{}\"?", suggestion)?;
                }
                Ok(())
            }
            PreferencesWarning::EmptyDocument { source } => {
                write!(f, "preferences document {} is empty, using defaults", source)
            }
        }
    }
}

/// Parse a settings document and apply it onto the defaults.
pub fn parse_preferences(
    content: &str,
    format: PreferenceFormat,
    source_name: &str,
) -> FrontendResult<LoadedPreferences> {
    if content.trim().is_empty() {
        return Ok(LoadedPreferences {
            preferences: Preferences::default(),
            warnings: vec![PreferencesWarning::EmptyDocument {
                source: source_name.to_string(),
            }],
        });
    }

    let mut unknown_paths: Vec<String> = Vec::new();
    let load_error = |message: String| FrontendError::PreferenceLoad {
        source_name: source_name.to_string(),
        message,
    };

    let document: PreferencesDocument = match format {
        PreferenceFormat::Toml => {
            let deserializer = toml::de::Deserializer::new(content);
            serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
                .map_err(|e| load_error(e.to_string()))?
        }
        PreferenceFormat::Yaml => {
            let deserializer = serde_yaml_ng::Deserializer::from_str(content);
            serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
                .map_err(|e| load_error(e.to_string()))?
        }
        PreferenceFormat::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(content);
            let document =
                serde_ignored::deserialize(&mut deserializer, |p| unknown_paths.push(p.to_string()))
                    .map_err(|e| load_error(e.to_string()))?;
            deserializer.end().map_err(|e| load_error(e.to_string()))?;
            document
        }
    };

    let mut preferences = Preferences::default();
    preferences.apply(document.settings);

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            PreferencesWarning::UnknownKey {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                source: source_name.to_string(),
            }
        })
        .collect();

    Ok(LoadedPreferences {
        preferences,
        warnings,
    })
}

/// Render `preferences` as a settings document.
pub fn render_preferences(
    preferences: &Preferences,
    format: PreferenceFormat,
) -> Result<String, String> {
    let document = PreferencesDocumentRef {
        settings: preferences,
    };
    match format {
        PreferenceFormat::Toml => toml::to_string_pretty(&document).map_err(|e| e.to_string()),
        PreferenceFormat::Yaml => serde_yaml_ng::to_string(&document).map_err(|e| e.to_string()),
        PreferenceFormat::Json => {
            serde_json::to_string_pretty(&document).map_err(|e| e.to_string())
        }
    }
}

/// Apply environment variable overrides (PKGFILE_* prefix)
pub fn with_env_overrides(preferences: Preferences) -> Preferences {
    with_overrides_from(preferences, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`.
pub fn with_overrides_from<F>(mut preferences: Preferences, lookup: F) -> Preferences
where
    F: Fn(&str) -> Option<String>,
{
    // PKGFILE_FILELIST_GENERATOR
    if let Some(generator) = lookup("PKGFILE_FILELIST_GENERATOR") {
        if !generator.trim().is_empty() {
            preferences.filelist_generator = generator.trim().to_string();
        }
    }

    // PKGFILE_OUTPUT_DIRECTORY (empty unsets)
    if let Some(dir) = lookup("PKGFILE_OUTPUT_DIRECTORY") {
        preferences.output_directory = Some(PathBuf::from(dir)).filter(|d| !d.as_os_str().is_empty());
    }

    // PKGFILE_BASE_INSTALL_DIR
    if let Some(dir) = lookup("PKGFILE_BASE_INSTALL_DIR") {
        preferences.base_install_dir = dir;
    }

    let flags: [(&str, &mut bool); 3] = [
        (
            "PKGFILE_CHANGELOG_OLD_TO_NEW",
            &mut preferences.changelog_old_to_new,
        ),
        ("PKGFILE_SIMPLE_OUTPUT", &mut preferences.simple_output),
        (
            "PKGFILE_EXPORT_COMPATIBLE_V1",
            &mut preferences.export_compatible_v1,
        ),
    ];
    for (name, slot) in flags {
        if let Some(raw) = lookup(name) {
            match parse_flag(&raw) {
                Some(value) => *slot = value,
                None => warn!(variable = name, value = %raw, "ignoring invalid boolean"),
            }
        }
    }

    preferences
}

/// Default preferences location: `<config dir>/pkgfile/preferences.toml`.
pub fn default_preferences_path() -> Option<PathBuf> {
    // Allow override for testing
    if let Ok(path) = std::env::var("PKGFILE_PREFERENCES_PATH") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("pkgfile").join("preferences.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in OPTION_NAMES.iter().copied().chain(["settings"]) {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
