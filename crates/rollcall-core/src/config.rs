//! Application configuration management.
//!
//! Settings are read from `~/.config/rollcall/config.json` when present and
//! then overridden by environment variables. Every setting is optional;
//! accessors supply the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{DEFAULT_API_BASE_URL, REQUEST_TIMEOUT_SECS};

/// Application name used for the config directory path
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_GITHUB_API_URL: &str = "ROLLCALL_GITHUB_API_URL";
const ENV_ROSTER_URL: &str = "ROLLCALL_ROSTER_URL";
const ENV_ROSTER_FILE: &str = "ROLLCALL_ROSTER_FILE";
const ENV_AGGREGATE_URL: &str = "ROLLCALL_AGGREGATE_URL";
const ENV_TIMEOUT_SECS: &str = "ROLLCALL_TIMEOUT_SECS";
const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub github_api_url: Option<String>,
    /// Never written to disk
    #[serde(skip)]
    pub github_token: Option<String>,
    pub roster_url: Option<String>,
    pub roster_file: Option<PathBuf>,
    pub aggregate_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) => Self::load_from(&path)?,
            Err(e) => {
                warn!(error = %e, "No config directory, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_GITHUB_API_URL) {
            self.github_api_url = Some(url);
        }
        if let Some(token) = get(ENV_GITHUB_TOKEN) {
            self.github_token = Some(token);
        }
        if let Some(url) = get(ENV_ROSTER_URL) {
            self.roster_url = Some(url);
        }
        if let Some(file) = get(ENV_ROSTER_FILE) {
            self.roster_file = Some(PathBuf::from(file));
        }
        if let Some(url) = get(ENV_AGGREGATE_URL) {
            self.aggregate_url = Some(url);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            match secs.parse() {
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => warn!(value = %secs, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn github_api_url(&self) -> &str {
        self.github_api_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(REQUEST_TIMEOUT_SECS))
    }
}
