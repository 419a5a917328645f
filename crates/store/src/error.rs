// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for store operations.
//!
//! HTTP statuses are normalized here so callers above the store only see an
//! absent value or one of these variants with a readable message.

use thiserror::Error;

use crate::transport::{ApiResponse, TransportError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not authenticated: {0}\n  hint: sign in again to get a fresh access token")]
    Unauthenticated(String),

    #[error("no repository selected\n  hint: choose a repository with 'devhub use <owner/name>'")]
    NoRepository,

    #[error("repository {repository} not found\n  hint: create it first or select a different repository")]
    RepositoryMissing { repository: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("remote conflict on {path}: {message}\n  hint: the file changed remotely; pull before saving again")]
    RemoteConflict { path: String, message: String },

    #[error("GitHub unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("GitHub rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("could not decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("invalid document: {0}")]
    Document(#[from] dh_core::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write queue stopped before the request completed")]
    QueueClosed,
}

impl StoreError {
    /// Maps a non-success response to an error.
    ///
    /// `path` is the request path, used to make conflict and not-found
    /// messages point at the file involved.
    pub fn from_response(path: &str, response: &ApiResponse) -> Self {
        let message = response
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("GitHub API error: {}", response.status));

        match response.status {
            401 => StoreError::Unauthenticated(message),
            404 => StoreError::NotFound(path.to_string()),
            409 => StoreError::RemoteConflict {
                path: path.to_string(),
                message,
            },
            // Missing or stale `sha` on a contents write comes back as 422
            422 if message.contains("sha") => StoreError::RemoteConflict {
                path: path.to_string(),
                message,
            },
            500..=599 => StoreError::RemoteUnavailable(message),
            status => StoreError::Rejected { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::RemoteConflict { .. })
    }
}

impl From<TransportError> for StoreError {
    fn from(e: TransportError) -> Self {
        StoreError::RemoteUnavailable(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
