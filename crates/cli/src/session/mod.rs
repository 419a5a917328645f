// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync orchestration for the active workspace.
//!
//! A [`Session`] owns the in-memory document and decides when it is
//! persisted through a [`GitHubStore`]:
//! - every edit marks the document dirty and restarts a debounce timer
//! - a periodic timer saves whatever is still dirty
//! - [`Session::save`] persists immediately, and switching workspaces
//!   flushes the outgoing one first
//!
//! State transitions are published on a `watch` channel as
//! [`SyncSnapshot`]s. The state mutex is never held across an await.

pub mod status;
mod timers;
mod workspaces;

#[cfg(test)]
mod test_helpers;

pub use status::{SaveTrigger, SyncPhase, SyncSnapshot};
pub use workspaces::PullOutcome;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dh_core::{WorkspaceData, DEFAULT_WORKSPACE};
use dh_store::{GitHubStore, Transport};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Timing knobs for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Quiet period after the last edit before an automatic save.
    pub debounce: Duration,
    /// Period of the background save of unsaved changes.
    pub auto_sync: Duration,
    /// How long success messages stay in the status.
    pub status_linger: Duration,
    /// How long error messages stay in the status.
    pub error_linger: Duration,
    /// Wait between creating a repository and first using it.
    pub repo_init_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            debounce: Duration::from_millis(1500),
            auto_sync: Duration::from_secs(300),
            status_linger: Duration::from_millis(2000),
            error_linger: Duration::from_secs(10),
            repo_init_delay: Duration::from_millis(1500),
        }
    }
}

struct SessionState {
    document: WorkspaceData,
    active: String,
    /// Names from the last listing plus any created since.
    workspaces: Vec<String>,
    phase: SyncPhase,
    status: String,
    dirty: bool,
    /// Bumped on every edit; a save clears `dirty` only if it saw the latest.
    edit_seq: u64,
    saves_in_flight: usize,
    last_synced: Option<DateTime<Utc>>,
    /// Latest debounce timer; older ones find a different value and do nothing.
    debounce_generation: u64,
    status_generation: u64,
    closed: bool,
}

impl SessionState {
    fn new() -> Self {
        SessionState {
            document: WorkspaceData::default(),
            active: DEFAULT_WORKSPACE.to_string(),
            workspaces: Vec::new(),
            phase: SyncPhase::Idle,
            status: String::new(),
            dirty: false,
            edit_seq: 0,
            saves_in_flight: 0,
            last_synced: None,
            debounce_generation: 0,
            status_generation: 0,
            closed: false,
        }
    }

    fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            phase: self.phase,
            status: self.status.clone(),
            has_unsaved_changes: self.dirty,
            is_syncing: self.saves_in_flight > 0,
            last_synced: self.last_synced,
            active_workspace: self.active.clone(),
        }
    }

    /// Phase once nothing is pending except possibly more saves.
    fn settled_phase(&self) -> SyncPhase {
        if self.saves_in_flight > 0 {
            SyncPhase::Saving
        } else if self.dirty {
            SyncPhase::Dirty
        } else {
            SyncPhase::Idle
        }
    }

    fn register(&mut self, name: &str) {
        if !self.workspaces.iter().any(|n| n == name) {
            self.workspaces.push(name.to_string());
        }
    }
}

#[derive(Default)]
struct Timers {
    periodic: Option<JoinHandle<()>>,
    debounce: Option<JoinHandle<()>>,
}

impl Timers {
    fn abort(&mut self) {
        if let Some(handle) = self.periodic.take() {
            handle.abort();
        }
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
    }
}

struct SessionInner<T: Transport> {
    store: GitHubStore<T>,
    options: SessionOptions,
    state: Mutex<SessionState>,
    timers: Mutex<Timers>,
    updates: watch::Sender<SyncSnapshot>,
}

impl<T: Transport> Drop for SessionInner<T> {
    fn drop(&mut self) {
        self.timers
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .abort();
    }
}

/// The state owner's handle on the active workspace and its persistence.
///
/// Cloning is cheap; clones share one session.
pub struct Session<T: Transport> {
    inner: Arc<SessionInner<T>>,
}

impl<T: Transport> Clone for Session<T> {
    fn clone(&self) -> Self {
        Session {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport + 'static> Session<T> {
    /// Create a session over `store` and start the periodic save timer.
    ///
    /// Must be called from within a tokio runtime. The active workspace is
    /// `default` with an empty document until one is loaded.
    pub fn new(store: GitHubStore<T>, options: SessionOptions) -> Self {
        let state = SessionState::new();
        let (updates, _) = watch::channel(state.snapshot());
        let session = Session {
            inner: Arc::new(SessionInner {
                store,
                options,
                state: Mutex::new(state),
                timers: Mutex::new(Timers::default()),
                updates,
            }),
        };
        session.start_periodic();
        session
    }

    pub fn store(&self) -> &GitHubStore<T> {
        &self.inner.store
    }

    pub fn options(&self) -> &SessionOptions {
        &self.inner.options
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.inner.updates.subscribe()
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        self.lock().snapshot()
    }

    /// A copy of the active document.
    pub fn document(&self) -> WorkspaceData {
        self.lock().document.clone()
    }

    pub fn active_workspace(&self) -> String {
        self.lock().active.clone()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.lock().dirty
    }

    /// Workspace names known to this session.
    pub fn known_workspaces(&self) -> Vec<String> {
        self.lock().workspaces.clone()
    }

    /// Mutate the active document. Marks it dirty.
    pub fn update<R>(&self, edit: impl FnOnce(&mut WorkspaceData) -> R) -> R {
        let mut state = self.lock();
        let result = edit(&mut state.document);
        self.mark_dirty_locked(&mut state);
        result
    }

    /// Replace the active document wholesale. Marks it dirty.
    pub fn replace_document(&self, document: WorkspaceData) {
        self.update(|current| *current = document);
    }

    /// Flag the document as changed, e.g. after an edit made elsewhere.
    pub fn mark_dirty(&self) {
        let mut state = self.lock();
        self.mark_dirty_locked(&mut state);
    }

    fn mark_dirty_locked(&self, state: &mut SessionState) {
        state.dirty = true;
        state.edit_seq += 1;
        state.phase = SyncPhase::Dirty;
        self.set_status(state, status::UNSAVED, false);
        if !state.closed {
            state.debounce_generation += 1;
            self.schedule_debounce(state.debounce_generation);
        }
        self.publish(state);
    }

    /// Persist the active document now.
    pub async fn save(&self) -> Result<()> {
        self.persist(SaveTrigger::Manual).await
    }

    /// Save if there are unsaved changes.
    pub(crate) async fn flush(&self) -> Result<()> {
        if self.has_unsaved_changes() {
            self.persist(SaveTrigger::Manual).await?;
        }
        Ok(())
    }

    pub(crate) async fn persist(&self, trigger: SaveTrigger) -> Result<()> {
        let (name, seq, pending) = {
            let mut state = self.lock();
            let value = state.document.to_value()?;
            state.saves_in_flight += 1;
            state.phase = SyncPhase::Saving;
            self.set_status(&mut state, status::SAVING, false);
            self.publish(&state);
            // Queued under the lock so queue order matches edit order
            let pending = self.inner.store.save_document(&state.active, &value, None);
            (state.active.clone(), state.edit_seq, pending)
        };
        debug!(workspace = %name, ?trigger, "saving workspace");

        let result = pending.await;

        let mut state = self.lock();
        state.saves_in_flight -= 1;
        match result {
            Ok(revision) => {
                if state.active == name && state.edit_seq == seq {
                    state.dirty = false;
                }
                state.phase = state.settled_phase();
                state.last_synced = Some(Utc::now());
                self.set_status(&mut state, trigger.success_status(), true);
                self.publish(&state);
                info!(workspace = %name, %revision, ?trigger, "saved workspace");
                Ok(())
            }
            Err(e) => {
                let err = Error::from(e);
                self.fail_locked(&mut state, &err);
                Err(err)
            }
        }
    }

    /// Stop both timers and drop cached revisions.
    ///
    /// Later edits still mark the document dirty but schedule nothing.
    pub fn teardown(&self) {
        {
            let mut state = self.lock();
            state.closed = true;
            state.debounce_generation += 1;
        }
        self.timers().abort();
        self.inner.store.clear_cache();
        info!("session torn down");
    }

    // ==================== Internals ====================

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn timers(&self) -> MutexGuard<'_, Timers> {
        self.inner.timers.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, state: &SessionState) {
        self.inner.updates.send_replace(state.snapshot());
    }

    /// Set the status text. A lingering one is cleared after
    /// `status_linger` unless replaced first.
    fn set_status(&self, state: &mut SessionState, text: &str, linger: bool) {
        state.status = text.to_string();
        state.status_generation += 1;
        if linger && !state.closed {
            self.schedule_status_clear(state.status_generation, self.inner.options.status_linger);
        }
    }

    /// Announce the start of a longer operation.
    fn begin(&self, text: &str) {
        let mut state = self.lock();
        self.set_status(&mut state, text, false);
        self.publish(&state);
    }

    fn fail(&self, err: &Error) {
        let mut state = self.lock();
        self.fail_locked(&mut state, err);
    }

    fn fail_locked(&self, state: &mut SessionState, err: &Error) {
        // Another queued save may still succeed
        state.phase = if state.saves_in_flight > 0 {
            SyncPhase::Saving
        } else {
            SyncPhase::Error
        };
        self.set_status(state, &status::error(&err.summary()), false);
        if !state.closed {
            self.schedule_status_clear(state.status_generation, self.inner.options.error_linger);
        }
        self.publish(state);
    }

    /// Make `name` the active, clean document.
    fn install(&self, name: &str, document: WorkspaceData, text: &str) {
        let mut state = self.lock();
        state.document = document;
        state.active = name.to_string();
        state.dirty = false;
        state.edit_seq += 1;
        state.debounce_generation += 1;
        state.last_synced = Some(Utc::now());
        state.register(name);
        state.phase = state.settled_phase();
        self.set_status(&mut state, text, true);
        self.publish(&state);
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
