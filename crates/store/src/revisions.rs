// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Revision cache: last observed blob SHA per document.
//!
//! The cache is scoped to one repository. Tokens are meaningless across
//! repositories, so switching repository drops every entry, and a write that
//! finishes for a repository that is no longer current does not record its
//! token.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct CacheState {
    repository: String,
    revisions: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct RevisionCache {
    state: Mutex<CacheState>,
}

impl RevisionCache {
    pub fn new(repository: &str) -> Self {
        RevisionCache {
            state: Mutex::new(CacheState {
                repository: repository.to_string(),
                revisions: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // A poisoned cache only means a panic mid-insert; the map is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Rescope the cache to `repository`, dropping all entries.
    pub fn reset(&self, repository: &str) {
        let mut state = self.lock();
        state.repository = repository.to_string();
        state.revisions.clear();
    }

    /// Drop all entries, keeping the current repository.
    pub fn clear(&self) {
        self.lock().revisions.clear();
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.lock().revisions.get(name).cloned()
    }

    /// Record the token observed for `name` in `repository`.
    ///
    /// Returns `false` and records nothing if the cache has since moved to a
    /// different repository.
    pub fn record(&self, repository: &str, name: &str, sha: &str) -> bool {
        let mut state = self.lock();
        if state.repository != repository {
            return false;
        }
        state.revisions.insert(name.to_string(), sha.to_string());
        true
    }

    /// Remove the token for `name` if the cache still belongs to `repository`.
    pub fn forget(&self, repository: &str, name: &str) {
        let mut state = self.lock();
        if state.repository == repository {
            state.revisions.remove(name);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "revisions_tests.rs"]
mod tests;
