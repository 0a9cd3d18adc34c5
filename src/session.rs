//! Session-scoped key-value storage for persisted filter state.
//!
//! The resolver reads the last selection from here when a request carries no
//! explicit parameter, and writes every resolved value back.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A string key-value store owned by one user session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Session store kept in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: BTreeMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Session store backed by a JSON file, so CLI invocations share state.
///
/// Values are loaded on open and written back by [`FileSession::save`].
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    inner: MemorySession,
    dirty: bool,
}

impl FileSession {
    /// Open the session file, starting empty if it does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| Error::SessionFormat {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(&path, e)),
        };

        debug!(path = %path.display(), keys = values.len(), "Loaded session");

        Ok(Self {
            path,
            inner: MemorySession { values },
            dirty: false,
        })
    }

    /// Write the session back to disk if anything changed.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(&self.inner.values).map_err(|source| {
            Error::SessionFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, content).map_err(|e| Error::io(&self.path, e))?;
        self.dirty = false;

        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        if self.inner.get(key).as_deref() != Some(value.as_str()) {
            self.dirty = true;
        }
        self.inner.set(key, value);
    }
}
