//! The signed-in session: bearer token, user profile and theme preference.
//!
//! A [`Session`] is loaded once at startup through a [`SessionStore`] and then
//! passed explicitly to whatever needs it (the HTTP client takes its token from
//! here). Nothing reads the session file behind the caller's back; changes are
//! persisted only by an explicit [`SessionStore::save`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::project_dirs;
use crate::models::{LoginResponse, User};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not determine data directory: {0}")]
    NoDataDir(String),

    #[error("Session file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Session file is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Light or dark rendering.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Self::Dark
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub theme: Theme,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Adopt the token and profile from a successful login.
    pub fn sign_in(&mut self, login: LoginResponse) {
        self.token = Some(login.access_token);
        self.user = Some(login.user);
    }

    /// Drop credentials. The theme preference survives a sign-out.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the per-user data directory.
    pub fn open_default() -> Result<Self, SessionError> {
        let dirs = project_dirs().map_err(|e| SessionError::NoDataDir(e.to_string()))?;
        Ok(Self::new(dirs.data_dir().join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session. A missing file is an empty, signed-out session.
    pub fn load(&self) -> Result<Session, SessionError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;
        tracing::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Delete the session file. Clearing an absent file is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
