//! # Session Store
//!
//! Persists the "stay connected" flag per chain id as a small JSON map
//! (`{"juno-1": true}`) so the next launch can reconnect silently.

use crate::core::error::Result;
use crate::core::service::SessionStore;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "session.json";

/// JSON-file backed [`SessionStore`].
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(FILE_NAME),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, bool>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(e) => {
                // A corrupt file only costs the user one manual connect
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(BTreeMap::new())
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, chain_id: &str) -> Result<bool> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.get(chain_id).copied().unwrap_or(false))
    }

    fn save(&self, chain_id: &str, connected: bool) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        if connected {
            map.insert(chain_id.to_string(), true);
        } else {
            map.remove(chain_id);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&map)
            .map_err(|e| crate::core::error::AppError::Storage(e.to_string()))?;
        fs::write(&self.path, json)?;

        tracing::debug!(chain_id = %chain_id, connected, path = %self.path.display(), "Session flag saved");
        Ok(())
    }
}
