//! File-backed session store
//!
//! One JSON document per `(session id, driver)` under a session directory
//! (default `<cache dir>/pkgfile/sessions`). Writers serialize on a sibling
//! `.lock` file and replace the document atomically; readers take the same
//! lock so they never see a record mid-replace.

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ports::{SessionError, SessionKey, SessionStore};
use crate::infrastructure::fs::atomic_write;

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new() -> Self {
        Self {
            dir: default_session_dir(),
        }
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Document path for `key`. Ids are hashed so any string is a safe name.
    pub fn record_path(&self, key: &SessionKey) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.session_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(key.driver.as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }

    fn lock_path(&self, key: &SessionKey) -> PathBuf {
        self.record_path(key).with_extension("lock")
    }

    /// Run `f` while holding the exclusive lock for `key`.
    fn locked<T>(
        &self,
        key: &SessionKey,
        f: impl FnOnce(&Path) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        fs::create_dir_all(&self.dir).map_err(access)?;
        let lock_file = fs::File::create(self.lock_path(key)).map_err(access)?;
        lock_file.lock_exclusive().map_err(access)?;

        let result = f(&self.record_path(key));

        let _ = lock_file.unlock();
        result
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn access(e: std::io::Error) -> SessionError {
    SessionError::AccessError {
        message: e.to_string(),
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &SessionKey) -> Result<Option<Value>, SessionError> {
        let record = self.locked(key, |path| {
            if !path.exists() {
                return Ok(None);
            }
            let content = fs::read_to_string(path).map_err(access)?;
            serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| SessionError::Corrupted {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
        })?;
        if record.is_some() {
            debug!(session = %key.session_id, driver = %key.driver, "loaded session record");
        }
        Ok(record)
    }

    fn put(&self, key: &SessionKey, record: Value) -> Result<(), SessionError> {
        let content =
            serde_json::to_string(&record).map_err(|e| SessionError::SerializationError {
                message: e.to_string(),
            })?;
        self.locked(key, |path| atomic_write(path, &content).map_err(access))?;
        debug!(session = %key.session_id, driver = %key.driver, "saved session record");
        Ok(())
    }

    fn reset(&self, key: &SessionKey) -> Result<(), SessionError> {
        self.locked(key, |path| match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(access(e)),
        })
    }
}

/// Default session directory: `<cache dir>/pkgfile/sessions`.
pub fn default_session_dir() -> PathBuf {
    // Allow override for testing
    if let Ok(path) = std::env::var("PKGFILE_SESSION_DIR") {
        return PathBuf::from(path);
    }
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pkgfile")
        .join("sessions")
}
