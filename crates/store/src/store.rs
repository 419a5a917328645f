// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub-backed document store.
//!
//! Translates document operations into contents API calls:
//! - `list_documents` / `load_document` read the repository root
//! - `save_document` / `delete_document` are serialized through the
//!   [`WriteQueue`] and guarded by the revision cache
//! - account and repository discovery for choosing where documents live

use std::fmt;
use std::future::Future;
use std::sync::{Arc, RwLock};

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use dh_core::{document_file_name, document_name_from_file, validate_document_name};

use crate::api::{
    ContentEntry, CreateRepositoryRequest, DeleteContentsRequest, FileContents,
    PutContentsRequest, RepositorySummary, UserProfile, WriteContentsResponse,
};
use crate::error::{Result, StoreError};
use crate::queue::WriteQueue;
use crate::revisions::RevisionCache;
use crate::transport::{ApiRequest, Method, Transport};

/// Description given to repositories created by [`GitHubStore::create_repository`].
pub const REPOSITORY_DESCRIPTION: &str = "DevHub data storage repository";

/// Connection parameters: bearer token and `owner/name` repository.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub repository: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, repository: impl Into<String>) -> Self {
        Credentials {
            token: token.into(),
            repository: repository.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.repository.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("repository", &self.repository)
            .finish()
    }
}

/// What to do when the pre-write revision probe neither finds the file nor
/// reports it missing (a timeout, a 5xx, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevisionProbe {
    /// Write with the cached token, if any. Favors availability.
    #[default]
    CachedFallback,
    /// Fail the save with the probe's error.
    Strict,
}

#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    pub revision_probe: RevisionProbe,
}

/// A document read from the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub value: Value,
    pub revision: String,
}

struct StoreInner<T> {
    transport: T,
    credentials: RwLock<Credentials>,
    revisions: RevisionCache,
    options: StoreOptions,
}

/// Client for one user's document repository.
///
/// Cloning is cheap and every clone shares credentials, the revision cache
/// and the write queue.
pub struct GitHubStore<T: Transport> {
    inner: Arc<StoreInner<T>>,
    queue: WriteQueue,
}

impl<T: Transport> Clone for GitHubStore<T> {
    fn clone(&self) -> Self {
        GitHubStore {
            inner: Arc::clone(&self.inner),
            queue: self.queue.clone(),
        }
    }
}

impl<T: Transport + 'static> GitHubStore<T> {
    /// Create a store and start its write queue.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(transport: T, credentials: Credentials, options: StoreOptions) -> Self {
        let revisions = RevisionCache::new(&credentials.repository);
        GitHubStore {
            inner: Arc::new(StoreInner {
                transport,
                credentials: RwLock::new(credentials),
                revisions,
                options,
            }),
            queue: WriteQueue::start(),
        }
    }

    // ==================== Credentials ====================

    /// Replace token and repository. Clears the revision cache.
    pub fn set_credentials(&self, token: &str, repository: &str) {
        let mut creds = self.write_credentials();
        creds.token = token.to_string();
        creds.repository = repository.to_string();
        self.inner.revisions.reset(repository);
    }

    /// Replace the token. Cached revisions stay valid.
    pub fn set_token(&self, token: &str) {
        self.write_credentials().token = token.to_string();
    }

    /// Point at another repository. Clears the revision cache.
    pub fn set_repo(&self, repository: &str) {
        let mut creds = self.write_credentials();
        creds.repository = repository.to_string();
        self.inner.revisions.reset(repository);
    }

    pub fn credentials(&self) -> Credentials {
        self.inner
            .credentials
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_complete()
    }

    /// Drop every cached revision token.
    pub fn clear_cache(&self) {
        self.inner.revisions.clear();
    }

    /// Last revision observed for `name`, if any.
    pub fn cached_revision(&self, name: &str) -> Option<String> {
        self.inner.revisions.get(name)
    }

    /// Number of writes queued or running.
    pub fn pending_writes(&self) -> usize {
        self.queue.pending()
    }

    fn write_credentials(&self) -> std::sync::RwLockWriteGuard<'_, Credentials> {
        self.inner
            .credentials
            .write()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn token(&self) -> Result<String> {
        let token = self.credentials().token;
        if token.is_empty() {
            return Err(StoreError::Unauthenticated(
                "no access token available".to_string(),
            ));
        }
        Ok(token)
    }

    /// Credentials for a repository-scoped call.
    fn scoped(&self) -> Result<Credentials> {
        let creds = self.credentials();
        if creds.token.is_empty() {
            return Err(StoreError::Unauthenticated(
                "no access token available".to_string(),
            ));
        }
        if creds.repository.is_empty() {
            return Err(StoreError::NoRepository);
        }
        Ok(creds)
    }

    // ==================== Requests ====================

    async fn call(
        &self,
        token: &str,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let mut request = ApiRequest::new(method, path, token);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        debug!(%method, path, "github request");

        let response = self.inner.transport.execute(request).await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            debug!(%method, path, status = response.status, "github request failed");
            Err(StoreError::from_response(path, &response))
        }
    }

    async fn call_json<R: DeserializeOwned>(
        &self,
        token: &str,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<R> {
        let value = self.call(token, method, path, body).await?;
        serde_json::from_value(value).map_err(|e| StoreError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    // ==================== Account & repositories ====================

    /// The account the token belongs to.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let token = self.token()?;
        self.call_json(&token, Method::Get, "/user", None).await
    }

    /// Repositories the account can access, most recently updated first.
    pub async fn list_repositories(&self) -> Result<Vec<RepositorySummary>> {
        let token = self.token()?;
        self.call_json(
            &token,
            Method::Get,
            "/user/repos?per_page=100&sort=updated",
            None,
        )
        .await
    }

    /// Whether the configured repository exists and is visible to the token.
    pub async fn repository_exists(&self) -> Result<bool> {
        let creds = self.scoped()?;
        self.check_repository(&creds).await
    }

    async fn check_repository(&self, creds: &Credentials) -> Result<bool> {
        let path = format!("/repos/{}", creds.repository);
        match self.call(&creds.token, Method::Get, &path, None).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Create a repository owned by the signed-in account.
    ///
    /// The repository is initialized with a commit so the contents API works
    /// on it right away.
    pub async fn create_repository(&self, name: &str, private: bool) -> Result<RepositorySummary> {
        let token = self.token()?;
        let body = serde_json::to_value(CreateRepositoryRequest {
            name,
            private,
            auto_init: true,
            description: REPOSITORY_DESCRIPTION,
        })?;
        let repo: RepositorySummary = self
            .call_json(&token, Method::Post, "/user/repos", Some(body))
            .await?;
        info!(repository = %repo.full_name, private, "created repository");
        Ok(repo)
    }

    // ==================== Documents ====================

    /// Names of the documents at the repository root.
    ///
    /// A missing or empty repository has no documents; that is not an error.
    pub async fn list_documents(&self) -> Result<Vec<String>> {
        let creds = self.scoped()?;
        let path = format!("/repos/{}/contents", creds.repository);

        let value = match self.call(&creds.token, Method::Get, &path, None).await {
            Ok(value) => value,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(StoreError::Rejected { message, .. }) if message.contains("empty") => {
                return Ok(Vec::new())
            }
            Err(e) => return Err(e),
        };

        if !value.is_array() {
            return Ok(Vec::new());
        }
        let entries: Vec<ContentEntry> =
            serde_json::from_value(value).map_err(|e| StoreError::Decode {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Ok(entries
            .iter()
            .filter(|entry| entry.is_file())
            .filter_map(|entry| document_name_from_file(&entry.name))
            .map(str::to_string)
            .collect())
    }

    /// Fetch and parse a document.
    ///
    /// Returns `None` if the file does not exist.
    pub async fn load_document(&self, name: &str) -> Result<Option<LoadedDocument>> {
        validate_document_name(name)?;
        let creds = self.scoped()?;
        let path = contents_path(&creds.repository, name);

        let file = match self.fetch_file(&creds.token, &path).await? {
            Some(file) => file,
            None => return Ok(None),
        };

        let decode_err = |reason: String| StoreError::Decode {
            path: path.clone(),
            reason,
        };
        let text = file.decode_text().map_err(decode_err)?;
        let value: Value = serde_json::from_str(&text).map_err(|e| decode_err(e.to_string()))?;

        self.inner
            .revisions
            .record(&creds.repository, name, &file.sha);
        debug!(name, revision = %file.sha, "loaded document");
        Ok(Some(LoadedDocument {
            value,
            revision: file.sha,
        }))
    }

    async fn fetch_file(&self, token: &str, path: &str) -> Result<Option<FileContents>> {
        match self.call_json(token, Method::Get, path, None).await {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write a document and return its new revision.
    ///
    /// The value is serialized and the write is queued before this returns.
    /// Saves run one at a time in call order; each one re-checks the
    /// repository and the file's current revision just before writing.
    pub fn save_document<V>(
        &self,
        name: &str,
        value: &V,
        message: Option<String>,
    ) -> impl Future<Output = Result<String>> + Send + 'static
    where
        V: Serialize + ?Sized,
    {
        let store = self.clone();
        let name = name.to_string();
        let prepared = validate_document_name(&name)
            .map_err(StoreError::from)
            .and_then(|()| Ok(serde_json::to_string_pretty(value)?))
            .and_then(|text| Ok((self.scoped()?, text)));

        self.queue.submit(async move {
            let (creds, text) = prepared?;
            store.write_document(&creds, &name, &text, message).await
        })
    }

    async fn write_document(
        &self,
        creds: &Credentials,
        name: &str,
        text: &str,
        message: Option<String>,
    ) -> Result<String> {
        if !self.check_repository(creds).await? {
            return Err(StoreError::RepositoryMissing {
                repository: creds.repository.clone(),
            });
        }

        let path = contents_path(&creds.repository, name);
        let sha = match self.fetch_file(&creds.token, &path).await {
            Ok(Some(existing)) => {
                self.inner
                    .revisions
                    .record(&creds.repository, name, &existing.sha);
                Some(existing.sha)
            }
            Ok(None) => None,
            Err(e) => match self.inner.options.revision_probe {
                RevisionProbe::CachedFallback => {
                    warn!(name, error = %e, "revision probe failed, using cached revision");
                    self.inner.revisions.get(name)
                }
                RevisionProbe::Strict => return Err(e),
            },
        };

        let message = message.unwrap_or_else(|| {
            format!(
                "Update {} - {}",
                name,
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
            )
        });
        let creating = sha.is_none();
        let body = serde_json::to_value(PutContentsRequest::new(message, text, sha))?;
        let response: WriteContentsResponse = self
            .call_json(&creds.token, Method::Put, &path, Some(body))
            .await?;

        let revision = response
            .content
            .map(|c| c.sha)
            .ok_or_else(|| StoreError::Decode {
                path: path.clone(),
                reason: "response has no content sha".to_string(),
            })?;
        self.inner
            .revisions
            .record(&creds.repository, name, &revision);
        info!(name, %revision, creating, "saved document");
        Ok(revision)
    }

    /// Delete a document.
    ///
    /// Deleting a document that does not exist succeeds. Deletes share the
    /// write queue with saves.
    pub fn delete_document(&self, name: &str) -> impl Future<Output = Result<()>> + Send + 'static {
        let store = self.clone();
        let name = name.to_string();
        let prepared = validate_document_name(&name)
            .map_err(StoreError::from)
            .and_then(|()| self.scoped());

        self.queue.submit(async move {
            let creds = prepared?;
            store.remove_document(&creds, &name).await
        })
    }

    async fn remove_document(&self, creds: &Credentials, name: &str) -> Result<()> {
        let path = contents_path(&creds.repository, name);

        let sha = match self.inner.revisions.get(name) {
            Some(sha) => sha,
            None => match self.fetch_file(&creds.token, &path).await? {
                Some(file) => file.sha,
                None => {
                    debug!(name, "delete of missing document is a no-op");
                    return Ok(());
                }
            },
        };

        let body = serde_json::to_value(DeleteContentsRequest {
            message: format!("Delete {}", name),
            sha,
        })?;
        match self.call(&creds.token, Method::Delete, &path, Some(body)).await {
            Ok(_) => info!(name, "deleted document"),
            Err(e) if e.is_not_found() => debug!(name, "document already gone"),
            Err(e) => return Err(e),
        }
        self.inner.revisions.forget(&creds.repository, name);
        Ok(())
    }
}

/// Contents API path of a document file.
pub fn contents_path(repository: &str, name: &str) -> String {
    format!(
        "/repos/{}/contents/{}",
        repository,
        urlencoding::encode(&document_file_name(name))
    )
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
