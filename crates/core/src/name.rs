// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document names and their file mapping.
//!
//! Each workspace document lives at the repository root as `<name>.json`.

use crate::error::{Error, Result};

/// Name of the workspace that always exists and cannot be deleted.
pub const DEFAULT_WORKSPACE: &str = "default";

/// Suffix of every document file in the repository.
pub const DOCUMENT_SUFFIX: &str = ".json";

/// Longest accepted document name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Validates a document name before it is turned into a repository path.
pub fn validate_document_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(Error::InvalidDocumentName {
            name: name.to_string(),
            reason,
        })
    };

    if name.trim().is_empty() {
        return invalid("must not be empty");
    }
    if name.chars().count() > MAX_NAME_LEN {
        return invalid("must be at most 100 characters");
    }
    if name.contains('/') || name.contains('\\') {
        return invalid("must not contain path separators");
    }
    if name.starts_with('.') {
        return invalid("must not start with '.'");
    }
    if name.chars().any(char::is_control) {
        return invalid("must not contain control characters");
    }
    if name.ends_with(DOCUMENT_SUFFIX) {
        return invalid("must not include the .json suffix");
    }
    Ok(())
}

/// Returns the repository file name for a document.
pub fn document_file_name(name: &str) -> String {
    format!("{}{}", name, DOCUMENT_SUFFIX)
}

/// Maps a repository file name back to a document name.
///
/// Returns `None` for files that are not documents.
pub fn document_name_from_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(DOCUMENT_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
