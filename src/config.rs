//! User configuration: where the backend lives and how long to wait for it.
//!
//! Stored as `config.json` in the user's config directory. Environment
//! variables override the file:
//! - `G360_API_URL` - backend base URL (default: `http://localhost:8000`)
//! - `G360_TIMEOUT_SECS` - request timeout in seconds (default: 30)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides. Falls back to defaults if the file is missing
    /// or fails to parse.
    pub fn load() -> Self {
        let config = match config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the configuration to the user's config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply `G360_*` overrides. `lookup` is `std::env::var` in production.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("G360_API_URL").filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(raw) = lookup("G360_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid G360_TIMEOUT_SECS={:?}", raw),
            }
        }
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        self
    }
}

/// Per-user directories for Gestão 360.
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("br", "ol", "gestao360")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// Location of `config.json`.
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}
