//! Preferences stored as a TOML, YAML or JSON settings document

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::{parse_preferences, render_preferences, Preferences};
use crate::domain::ports::{LoadedPreferences, PreferenceFormat, PreferenceSource, PreferenceStore};
use crate::error::{FrontendError, FrontendResult};
use crate::infrastructure::fs::atomic_write;

#[derive(Debug, Clone, Copy, Default)]
pub struct FilePreferenceStore;

impl FilePreferenceStore {
    pub fn new() -> Self {
        Self
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, source: &PreferenceSource) -> FrontendResult<LoadedPreferences> {
        match source {
            PreferenceSource::Defaults => Ok(LoadedPreferences::default()),
            PreferenceSource::File(path) => {
                let content =
                    fs::read_to_string(path).map_err(|e| FrontendError::PreferenceLoad {
                        source_name: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                debug!(path = %path.display(), "read preferences document");
                parse_preferences(
                    &content,
                    PreferenceFormat::from_path(path),
                    &path.display().to_string(),
                )
            }
            PreferenceSource::Inline { format, content } => {
                parse_preferences(content, *format, &source.describe())
            }
        }
    }

    fn save(&self, target: &Path, preferences: &Preferences) -> FrontendResult<()> {
        let save_error = |message: String| FrontendError::PreferenceSave {
            target: target.to_path_buf(),
            message,
        };
        let content = render_preferences(preferences, PreferenceFormat::from_path(target))
            .map_err(save_error)?;
        atomic_write(target, &content).map_err(|e| save_error(e.to_string()))?;
        debug!(path = %target.display(), "wrote preferences document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_need_no_storage() {
        let loaded = FilePreferenceStore.load(&PreferenceSource::Defaults).unwrap();
        assert_eq!(loaded.preferences, Preferences::default());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let source = PreferenceSource::File(dir.path().join("absent.toml"));
        let err = FilePreferenceStore.load(&source).unwrap_err();
        assert_eq!(err.code(), "preference_load");
    }

    #[test]
    fn saved_document_loads_back_in_every_format() {
        let dir = tempdir().unwrap();
        let mut preferences = Preferences::default();
        preferences.filelist_generator = "Git".to_string();
        preferences.roles.insert("txt".to_string(), "doc".to_string());

        for name in ["prefs.toml", "prefs.yaml", "prefs.json"] {
            let path = dir.path().join(name);
            FilePreferenceStore.save(&path, &preferences).unwrap();
            let loaded = FilePreferenceStore
                .load(&PreferenceSource::File(path))
                .unwrap();
            assert_eq!(loaded.preferences, preferences, "{name}");
        }
    }

    #[test]
    fn inline_document_reports_unknown_keys() {
        let source = PreferenceSource::Inline {
            format: PreferenceFormat::Toml,
            content: "[settings]\nfilelistgenerater = \"Git\"\n".to_string(),
        };
        let loaded = FilePreferenceStore.load(&source).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].to_string().contains("filelistgenerator"));
    }
}
