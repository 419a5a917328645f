// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dh_store::StoreError;
use thiserror::Error;

/// All possible errors that can occur in the dhrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] dh_core::Error),

    #[error("workspace already exists: {0}")]
    AlreadyExists(String),

    #[error("cannot delete workspace '{0}'\n  hint: the default workspace always exists; clear it with 'devhub import' instead")]
    ProtectedDocument(String),

    #[error("invalid import payload: {0}\n  hint: the file must hold a single workspace JSON object, as written by 'devhub export'")]
    InvalidImportPayload(String),

    #[error("no repository selected\n  hint: run 'devhub use <owner/name>' or pass --repo")]
    NoRepositorySelected,

    #[error("invalid repository '{0}'\n  hint: expected the form owner/name")]
    InvalidRepository(String),

    #[error("no access token found in ${0}\n  hint: export a GitHub token with repo scope, e.g. {0}=ghp_...")]
    MissingToken(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// The first line of the message, without hints. Used for status text.
    pub fn summary(&self) -> String {
        let message = self.to_string();
        message.lines().next().unwrap_or_default().to_string()
    }
}

/// A specialized Result type for dhrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
