// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration management.
//!
//! Configuration is stored in `config.toml` under the config directory
//! (`$DEVHUB_CONFIG_DIR`, else the platform config dir joined with `devhub`)
//! and has two tables:
//! - `[github]`: API base URL, the environment variable holding the token,
//!   and the request timeout
//! - `[sync]`: debounce, auto-sync, status linger and repository init delays,
//!   plus the revision probe policy
//!
//! A missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dh_store::{HttpConfig, RevisionProbe, StoreOptions, GITHUB_API_BASE};
use serde::{Deserialize, Serialize};

use crate::env;
use crate::error::{Error, Result};
use crate::session::SessionOptions;

const APP_DIR_NAME: &str = "devhub";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level `config.toml` contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub sync: SyncConfig,
}

/// The `[github]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API root, without a trailing slash.
    pub api_base: String,
    /// Name of the environment variable that holds the bearer token.
    pub token_env: String,
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_base: GITHUB_API_BASE.to_string(),
            token_env: env::vars::DEFAULT_TOKEN_VAR.to_string(),
            timeout_secs: 30,
        }
    }
}

/// The `[sync]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Quiet period after the last edit before saving.
    pub debounce_ms: u64,
    /// Interval of the periodic save of unsaved changes.
    pub auto_sync_secs: u64,
    /// How long success messages stay in the status line.
    pub status_linger_ms: u64,
    /// How long error messages stay in the status line.
    pub error_linger_ms: u64,
    /// Wait after creating a repository before its contents API is used.
    pub repo_init_delay_ms: u64,
    pub revision_probe: RevisionProbe,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            debounce_ms: 1500,
            auto_sync_secs: 300,
            status_linger_ms: 2000,
            error_linger_ms: 10_000,
            repo_init_delay_ms: 1500,
            revision_probe: RevisionProbe::CachedFallback,
        }
    }
}

impl Config {
    /// Loads `config.toml` from `dir`, or defaults if the file is absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(Error::Config(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(CONFIG_FILE_NAME), self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.github.api_base.trim().is_empty() {
            return Err(Error::Config("github.api_base cannot be empty".to_string()));
        }
        if self.github.token_env.trim().is_empty() {
            return Err(Error::Config("github.token_env cannot be empty".to_string()));
        }
        if self.sync.auto_sync_secs == 0 {
            return Err(Error::Config(
                "sync.auto_sync_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            api_base: self.github.api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.github.timeout_secs),
            ..HttpConfig::default()
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            revision_probe: self.sync.revision_probe,
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            debounce: Duration::from_millis(self.sync.debounce_ms),
            auto_sync: Duration::from_secs(self.sync.auto_sync_secs),
            status_linger: Duration::from_millis(self.sync.status_linger_ms),
            error_linger: Duration::from_millis(self.sync.error_linger_ms),
            repo_init_delay: Duration::from_millis(self.sync.repo_init_delay_ms),
        }
    }
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::config_dir() {
        return Ok(dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .ok_or_else(|| Error::Config("cannot determine a config directory".to_string()))
}

/// Full path of `config.toml`.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the user's configuration from the default location.
pub fn load_default() -> Result<Config> {
    Config::load(&config_dir()?)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
