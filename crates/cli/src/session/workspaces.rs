// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace lifecycle: listing, loading, creating, deleting, switching,
//! import and export, and choosing the repository they live in.

use dh_core::{validate_document_name, WorkspaceData, DEFAULT_WORKSPACE};
use dh_store::{RepositorySummary, Transport};
use serde_json::Value;
use tracing::{info, warn};

use super::{status, SaveTrigger, Session};
use crate::error::{Error, Result};

/// Result of [`Session::sync_now`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullOutcome {
    /// The in-memory document had unsaved edits that the pull overwrote.
    pub discarded_local_changes: bool,
}

impl<T: Transport + 'static> Session<T> {
    /// Names of the workspaces in the repository.
    ///
    /// An empty repository still has the `default` workspace; it is written
    /// the first time it is loaded.
    pub async fn list_workspaces(&self) -> Result<Vec<String>> {
        let mut names = self.inner.store.list_documents().await?;
        if names.is_empty() {
            names.push(DEFAULT_WORKSPACE.to_string());
        }
        self.lock().workspaces = names.clone();
        Ok(names)
    }

    /// Load `name` into memory and make it active, replacing the current
    /// document. A workspace that does not exist yet is created empty.
    pub async fn load_workspace(&self, name: &str) -> Result<()> {
        validate_document_name(name)?;
        self.begin(status::LOADING_WORKSPACE);
        self.fetch_into_memory(name).await
    }

    async fn fetch_into_memory(&self, name: &str) -> Result<()> {
        match self.fetch(name).await {
            Ok((document, created)) => {
                let text = if created { status::CREATED } else { status::LOADED };
                self.install(name, document, text);
                info!(workspace = name, created, "loaded workspace");
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    async fn fetch(&self, name: &str) -> Result<(WorkspaceData, bool)> {
        let store = &self.inner.store;
        match store.load_document(name).await? {
            Some(loaded) => Ok((WorkspaceData::from_value(loaded.value)?, false)),
            None => {
                let document = WorkspaceData::default();
                store.save_document(name, &document, None).await?;
                Ok((document, true))
            }
        }
    }

    /// Create a new, empty workspace and make it active.
    ///
    /// Unsaved changes to the current workspace are saved first.
    pub async fn create_workspace(&self, name: &str) -> Result<()> {
        validate_document_name(name)?;
        let known = self.list_workspaces().await?;
        if known.iter().any(|n| n == name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        self.flush().await?;

        let document = WorkspaceData::default();
        if let Err(e) = self.inner.store.save_document(name, &document, None).await {
            let err = Error::from(e);
            self.fail(&err);
            return Err(err);
        }
        self.install(name, document, &status::workspace_created(name));
        info!(workspace = name, "created workspace");
        Ok(())
    }

    /// Delete a workspace. Deleting the active one loads `default`.
    pub async fn delete_workspace(&self, name: &str) -> Result<()> {
        if name == DEFAULT_WORKSPACE {
            return Err(Error::ProtectedDocument(name.to_string()));
        }
        validate_document_name(name)?;

        let (was_active, discarded) = {
            let mut state = self.lock();
            let active = state.active == name;
            let discarded = active && state.dirty;
            if active {
                // Edits to a document being deleted must not re-create it
                state.dirty = false;
                state.edit_seq += 1;
                state.debounce_generation += 1;
            }
            (active, discarded)
        };

        if let Err(e) = self.inner.store.delete_document(name).await {
            let err = Error::from(e);
            let mut state = self.lock();
            if discarded && state.active == name {
                state.dirty = true;
            }
            self.fail_locked(&mut state, &err);
            return Err(err);
        }
        {
            let mut state = self.lock();
            state.workspaces.retain(|n| n != name);
            if state.active == name {
                state.active = DEFAULT_WORKSPACE.to_string();
                state.document = WorkspaceData::default();
                state.dirty = false;
                state.edit_seq += 1;
                state.debounce_generation += 1;
                state.phase = state.settled_phase();
                self.publish(&state);
            }
        }
        if discarded {
            warn!(workspace = name, "delete discarded unsaved changes");
        }
        info!(workspace = name, "deleted workspace");

        if was_active {
            self.load_workspace(DEFAULT_WORKSPACE).await?;
        }
        Ok(())
    }

    /// Make `name` the active workspace.
    ///
    /// Unsaved changes are saved first. If that save fails the switch does
    /// not happen and the error is returned.
    pub async fn switch_workspace(&self, name: &str) -> Result<()> {
        if self.active_workspace() == name {
            return Ok(());
        }
        validate_document_name(name)?;
        self.flush().await?;
        self.load_workspace(name).await
    }

    /// The active document as pretty-printed JSON.
    pub fn export_document(&self) -> Result<String> {
        Ok(self.lock().document.to_pretty_json()?)
    }

    /// Replace the active document with `json` and save it.
    ///
    /// A payload that is not a JSON object leaves the document untouched. If
    /// the save fails the new content stays in memory, marked unsaved.
    pub async fn import_document(&self, json: &str) -> Result<()> {
        let document = parse_import(json)?;
        self.replace_document(document);
        self.persist(SaveTrigger::Manual).await
    }

    /// Switch to `name` and import `json` there.
    ///
    /// The payload is checked before switching, so a bad one leaves the
    /// active workspace and the repository as they were.
    pub async fn import_into(&self, name: &str, json: &str) -> Result<()> {
        let document = parse_import(json)?;
        self.switch_workspace(name).await?;
        self.replace_document(document);
        self.persist(SaveTrigger::Manual).await
    }

    /// Reload the active workspace from the repository, overwriting memory.
    pub async fn sync_now(&self) -> Result<PullOutcome> {
        let (name, discarded) = {
            let state = self.lock();
            (state.active.clone(), state.dirty)
        };
        self.begin(status::LOADING);
        self.fetch_into_memory(&name).await?;
        if discarded {
            warn!(workspace = %name, "pull discarded unsaved changes");
        }
        Ok(PullOutcome {
            discarded_local_changes: discarded,
        })
    }

    /// Point the session at `repository` and load its first workspace.
    pub async fn open_repository(&self, repository: &str) -> Result<String> {
        self.resume(repository, None).await
    }

    /// Like [`Session::open_repository`], preferring `workspace` if the
    /// repository has it. Returns the workspace that was loaded.
    pub async fn resume(&self, repository: &str, workspace: Option<&str>) -> Result<String> {
        if self.inner.store.credentials().repository != repository {
            self.flush().await?;
            self.inner.store.set_repo(repository);
            self.lock().workspaces.clear();
        }
        self.begin(status::LOADING);

        let names = match self.list_workspaces().await {
            Ok(names) => names,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };
        let target = workspace
            .filter(|w| names.iter().any(|n| n == w))
            .map(str::to_string)
            .or_else(|| names.first().cloned())
            .unwrap_or_else(|| DEFAULT_WORKSPACE.to_string());

        self.fetch_into_memory(&target).await?;
        info!(repository, workspace = %target, "opened repository");
        Ok(target)
    }

    /// Create a private repository for the signed-in account and open it.
    pub async fn create_repository(&self, name: &str) -> Result<RepositorySummary> {
        self.create_repository_with(name, true).await
    }

    /// Like [`Session::create_repository`] with a choice of visibility.
    pub async fn create_repository_with(
        &self,
        name: &str,
        private: bool,
    ) -> Result<RepositorySummary> {
        self.begin(status::CREATING_REPOSITORY);
        let store = &self.inner.store;

        let created = async {
            let user = store.current_user().await?;
            let repo = store.create_repository(name, private).await?;
            Ok::<_, Error>((user, repo))
        }
        .await;
        let (user, repo) = match created {
            Ok(created) => created,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };

        // Contents API calls fail until the initial commit lands
        tokio::time::sleep(self.inner.options.repo_init_delay).await;
        self.open_repository(&format!("{}/{}", user.login, name))
            .await?;

        let mut state = self.lock();
        self.set_status(&mut state, status::REPOSITORY_CREATED, true);
        self.publish(&state);
        Ok(repo)
    }
}

fn parse_import(json: &str) -> Result<WorkspaceData> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| Error::InvalidImportPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::InvalidImportPayload(
            "expected a JSON object".to_string(),
        ));
    }
    WorkspaceData::from_value(value).map_err(|e| Error::InvalidImportPayload(e.to_string()))
}

#[cfg(test)]
#[path = "workspaces_tests.rs"]
mod tests;
