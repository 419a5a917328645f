// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for dh-core operations.

use thiserror::Error;

/// All possible errors that can occur in dh-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid document name '{name}': {reason}")]
    InvalidDocumentName { name: String, reason: &'static str },

    #[error("document is not a JSON object\n  hint: a workspace document must be a top-level {{ ... }} value")]
    NotAnObject,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for dh-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
