// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync phase and the status snapshot published to observers.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const UNSAVED: &str = "Unsaved changes";
pub const SAVING: &str = "Saving...";
pub const SAVED: &str = "Saved";
pub const AUTO_SYNCED: &str = "Auto-synced";
pub const LOADING: &str = "Loading...";
pub const LOADING_WORKSPACE: &str = "Loading workspace...";
pub const LOADED: &str = "Loaded";
pub const CREATED: &str = "Created";
pub const CREATING_REPOSITORY: &str = "Creating repository...";
pub const REPOSITORY_CREATED: &str = "Repository created";

pub fn workspace_created(name: &str) -> String {
    format!("Workspace \"{}\" created", name)
}

pub fn error(message: &str) -> String {
    format!("Error: {}", message)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPhase {
    #[default]
    Idle,
    Dirty,
    Saving,
    Error,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SyncPhase::Idle => "idle",
            SyncPhase::Dirty => "dirty",
            SyncPhase::Saving => "saving",
            SyncPhase::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Point-in-time view of a session's sync state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncSnapshot {
    pub phase: SyncPhase,
    /// Last transition message. Empty once a success message has lingered.
    pub status: String,
    pub has_unsaved_changes: bool,
    pub is_syncing: bool,
    pub last_synced: Option<DateTime<Utc>>,
    pub active_workspace: String,
}

/// Why a save was started. Decides the success message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    Manual,
    Debounce,
    Periodic,
}

impl SaveTrigger {
    pub fn success_status(self) -> &'static str {
        match self {
            SaveTrigger::Periodic => AUTO_SYNCED,
            SaveTrigger::Manual | SaveTrigger::Debounce => SAVED,
        }
    }
}
