//! Persisted login session.
//!
//! The bearer token and a minimal copy of the signed-in user live in
//! `session.json` next to the config file. The store doubles as the
//! [`CredentialProvider`] for the API client, so a login or logout is seen
//! by every subsequent request.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::User;
use crate::config::{CredentialProvider, SecureString};

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedSession {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl std::fmt::Debug for PersistedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSession")
            .field("token", &"••••••••")
            .field("user", &self.user.as_ref().map(|u| &u.username))
            .finish()
    }
}

/// File-backed session with an in-memory cache.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    cached: RwLock<Option<PersistedSession>>,
}

impl SessionStore {
    /// Session file living beside the given config file.
    pub fn path_for(config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .map(|dir| dir.join(SESSION_FILE))
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE))
    }

    /// Open the session file. A missing file means signed out; a corrupt one
    /// is logged and treated the same way.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let cached = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<PersistedSession>(&content) {
                Ok(session) if !session.token.is_empty() => Some(session),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(source) => return Err(SessionError::Read { path, source }),
        };

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_signed_in(&self) -> bool {
        self.cached.read().is_some()
    }

    /// User saved alongside the token.
    pub fn user(&self) -> Option<User> {
        self.cached.read().as_ref().and_then(|s| s.user.clone())
    }

    /// Persist a fresh login. The session is active for this run even when
    /// the file write fails.
    pub fn save(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let session = PersistedSession {
            token: token.to_string(),
            user: Some(user.clone()),
        };
        let content = serde_json::to_vec_pretty(&session)?;
        *self.cached.write() = Some(session);
        self.write_file(&content)?;
        tracing::info!(username = %user.username, "Session saved");
        Ok(())
    }

    /// Forget the session. The cache is cleared even if the file cannot be
    /// removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.cached.write() = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_file(&self, content: &[u8]) -> Result<(), SessionError> {
        let write_err = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        std::fs::rename(&tmp, &self.path).map_err(write_err)
    }
}

impl CredentialProvider for SessionStore {
    fn token(&self) -> Option<SecureString> {
        self.cached
            .read()
            .as_ref()
            .map(|s| SecureString::new(s.token.clone()))
    }
}
