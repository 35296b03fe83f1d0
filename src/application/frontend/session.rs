//! Session lifecycle, preferences and diagnostics

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::application::diagnostics::{Diagnostic, ErrorStack};
use crate::config::{with_env_overrides, Preferences};
use crate::domain::entities::SessionState;
use crate::domain::ports::{
    DescriptorFactory, PreferenceSource, PreferenceStore, SessionError, SessionKey, SessionStore,
};
use crate::domain::services::GeneratorRegistry;
use crate::domain::value_objects::Severity;
use crate::error::{FrontendError, FrontendResult};

use super::{Frontend, FrontendOptions};

impl<F, S> Frontend<F, S>
where
    F: DescriptorFactory,
    S: SessionStore,
{
    /// Open the session record for `options`, starting an empty one when
    /// the store has none.
    pub fn open(
        options: FrontendOptions,
        preferences: Preferences,
        factory: F,
        store: S,
        generators: GeneratorRegistry,
    ) -> FrontendResult<Self> {
        let key = SessionKey::new(&options.session_id, &options.driver);
        let state = match store.get(&key)? {
            Some(record) => serde_json::from_value(record).map_err(|e| {
                SessionError::SerializationError {
                    message: e.to_string(),
                }
            })?,
            None => SessionState::new(),
        };
        debug!(
            session = %key.session_id,
            driver = %key.driver,
            has_package = state.descriptor().is_some(),
            "session opened"
        );

        Ok(Self {
            options,
            preferences,
            factory,
            store,
            generators,
            key,
            state,
            diagnostics: ErrorStack::new(),
        })
    }

    /// Persist the session record.
    pub fn save(&self) -> FrontendResult<()> {
        let record = serde_json::to_value(&self.state).map_err(|e| {
            SessionError::SerializationError {
                message: e.to_string(),
            }
        })?;
        self.store.put(&self.key, record)?;
        debug!(session = %self.key.session_id, "session saved");
        Ok(())
    }

    /// Drop the session record and start over with an empty state.
    pub fn reset(&mut self) -> FrontendResult<()> {
        self.store.reset(&self.key)?;
        self.state = SessionState::new();
        info!(session = %self.key.session_id, driver = %self.key.driver, "session reset");
        Ok(())
    }

    pub fn session_key(&self) -> &SessionKey {
        &self.key
    }

    pub fn options(&self) -> &FrontendOptions {
        &self.options
    }

    pub fn generators(&self) -> &GeneratorRegistry {
        &self.generators
    }

    // === Preferences ===

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Replace the preferences with the ones read from `source`, then apply
    /// environment overrides. Unknown keys become notices.
    pub fn load_preferences(
        &mut self,
        store: &dyn PreferenceStore,
        source: &PreferenceSource,
    ) -> FrontendResult<()> {
        let loaded = self.diagnostics.record(Severity::Error, store.load(source))?;
        for warning in &loaded.warnings {
            self.diagnostics
                .push(Severity::Notice, "preference", warning.to_string());
        }
        self.preferences = with_env_overrides(loaded.preferences);
        info!(
            source = %source.describe(),
            warnings = loaded.warnings.len(),
            "preferences loaded"
        );
        Ok(())
    }

    pub fn save_preferences(
        &mut self,
        store: &dyn PreferenceStore,
        target: &Path,
    ) -> FrontendResult<()> {
        let result = store.save(target, &self.preferences);
        self.diagnostics.record(Severity::Error, result)?;
        info!(target = %target.display(), "preferences saved");
        Ok(())
    }

    pub fn get_option(&mut self, name: &str) -> FrontendResult<Value> {
        let result = self
            .preferences
            .get_option(name)
            .ok_or_else(|| FrontendError::UnknownOption {
                option: name.to_string(),
            });
        self.diagnostics.record(Severity::Exception, result)
    }

    pub fn set_option(&mut self, name: &str, value: Value) -> FrontendResult<()> {
        let result = self.preferences.set_option(name, value);
        let severity = match &result {
            Err(FrontendError::UnknownOption { .. }) => Severity::Exception,
            _ => Severity::Error,
        };
        self.diagnostics.record(severity, result)
    }

    // === Diagnostics ===

    /// See [`ErrorStack::has_errors`].
    pub fn has_errors(&self, level: Option<Severity>) -> bool {
        self.diagnostics.has_errors(level)
    }

    pub fn errors(&mut self, purge: bool) -> Vec<Diagnostic> {
        self.diagnostics.errors(purge)
    }

    pub fn diagnostics(&self) -> &ErrorStack {
        &self.diagnostics
    }
}
