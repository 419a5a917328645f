// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local state remembered between runs.
//!
//! `state.json` holds the last opened repository and its active workspace
//! so commands can resume without `--repo`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env;
use crate::error::Result;

const APP_DIR_NAME: &str = "devhub";
const STATE_FILE_NAME: &str = "state.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_workspace: Option<String>,
}

impl LocalState {
    /// Reads `state.json` from `dir`.
    ///
    /// A missing or unreadable file gives the empty state; losing it only
    /// means the next command needs `--repo`.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(STATE_FILE_NAME);
        let Ok(content) = fs::read_to_string(&path) else {
            return LocalState::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt state file");
            LocalState::default()
        })
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(STATE_FILE_NAME), content)?;
        Ok(())
    }

    /// Records `repository` as last used. Switching repositories forgets the
    /// active workspace.
    pub fn remember_repository(&mut self, repository: &str) {
        if self.last_repository.as_deref() != Some(repository) {
            self.active_workspace = None;
        }
        self.last_repository = Some(repository.to_string());
    }
}

/// State directory: `$DEVHUB_STATE_DIR`, else `$XDG_STATE_HOME/devhub`,
/// else `~/.local/state/devhub`.
pub fn state_dir() -> PathBuf {
    if let Some(dir) = env::state_dir() {
        return dir;
    }
    if let Some(dir) = env::xdg_state_home() {
        return dir.join(APP_DIR_NAME);
    }
    dirs::home_dir()
        .map(|h| h.join(".local/state").join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".local/state").join(APP_DIR_NAME))
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
