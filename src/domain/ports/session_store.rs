//! SessionStore port
//!
//! Keeps one opaque record per `(session id, driver)` between requests. The
//! store is the only serialization point for a session: implementations must
//! let at most one writer touch a given key at a time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub session_id: String,
    pub driver: String,
}

impl SessionKey {
    pub fn new(session_id: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            driver: driver.into(),
        }
    }
}

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &SessionKey) -> Result<Option<Value>, SessionError>;
    fn put(&self, key: &SessionKey, record: Value) -> Result<(), SessionError>;
    /// Drop the record; a later `get` returns `None`.
    fn reset(&self, key: &SessionKey) -> Result<(), SessionError>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("failed to access session store: {message}")]
    AccessError { message: String },

    #[error("failed to serialize session: {message}")]
    SerializationError { message: String },

    #[error("session record corrupted: {}\n  → Fix: reset the session\n  → Details: {message}", .path.display())]
    Corrupted { path: PathBuf, message: String },
}
