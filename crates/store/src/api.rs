// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire types for the GitHub REST endpoints the store uses.
//!
//! Only the fields the store reads are modeled; everything else in the
//! responses is ignored.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Signed-in account, from `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Repository listing entry, from `GET /user/repos` and `GET /repos/{repo}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
}

/// Body of `POST /user/repos`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepositoryRequest<'a> {
    pub name: &'a str,
    pub private: bool,
    pub auto_init: bool,
    pub description: &'a str,
}

/// Entry of a directory listing, from `GET /repos/{repo}/contents`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        match self.entry_type.as_deref() {
            None => true,
            Some(t) => t == "file",
        }
    }
}

/// A single file, from `GET /repos/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContents {
    pub sha: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileContents {
    /// Decodes the transported content into text.
    ///
    /// GitHub wraps base64 content at 60 columns, so line breaks are removed
    /// before decoding.
    pub fn decode_text(&self) -> Result<String, String> {
        match self.encoding.as_deref() {
            None | Some("base64") => {}
            Some(other) => return Err(format!("unsupported encoding '{}'", other)),
        }
        let packed: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD.decode(packed).map_err(|e| e.to_string())?;
        String::from_utf8(bytes).map_err(|e| e.to_string())
    }
}

/// Body of `PUT /repos/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct PutContentsRequest {
    pub message: String,
    /// Base64 of the file bytes.
    pub content: String,
    /// Revision being replaced. Omitted when creating the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl PutContentsRequest {
    pub fn new(message: String, text: &str, sha: Option<String>) -> Self {
        PutContentsRequest {
            message,
            content: STANDARD.encode(text.as_bytes()),
            sha,
        }
    }
}

/// Body of `DELETE /repos/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteContentsRequest {
    pub message: String,
    pub sha: String,
}

/// Response of a contents write.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteContentsResponse {
    #[serde(default)]
    pub content: Option<ContentRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRef {
    pub sha: String,
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
