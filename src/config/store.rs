//! Shared configuration storage.
//!
//! The UI thread and request tasks both read the config; reloads replace it
//! atomically.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Config container with interior mutability.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    /// Create a new ConfigStore from initial config and path.
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Reload config from the file.
    ///
    /// On success, replaces the current config but keeps the base URL the
    /// session was started with. On failure, keeps the old config.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let mut config = Config::load_from(&self.path)?;
        let mut guard = self.inner.write();
        config.api.base_url = guard.api.base_url.clone();
        *guard = config;
        Ok(())
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_keeps_session_base_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://other.example\"\n[search]\ndebounce_ms = 250\n",
        )
        .expect("write config");

        let mut initial = Config::default();
        initial.api.base_url = "http://127.0.0.1:9".to_string();
        let store = ConfigStore::new(initial, path);
        store.reload().expect("reload");

        let config = store.get();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9");
        assert_eq!(config.search.debounce_ms, 250);
    }
}
