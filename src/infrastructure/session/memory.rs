//! In-process session store
//!
//! Clones share one map, so a frontend reopened with a clone of the store
//! sees what the previous request saved.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::domain::ports::{SessionError, SessionKey, SessionStore};

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    records: Arc<Mutex<HashMap<SessionKey, Value>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionKey, Value>>, SessionError> {
        self.records.lock().map_err(|e| SessionError::AccessError {
            message: e.to_string(),
        })
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &SessionKey) -> Result<Option<Value>, SessionError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &SessionKey, record: Value) -> Result<(), SessionError> {
        self.lock()?.insert(key.clone(), record);
        Ok(())
    }

    fn reset(&self, key: &SessionKey) -> Result<(), SessionError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
