// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Debounce, periodic and status-linger timers.
//!
//! Timer tasks hold a weak reference so a dropped session stops them.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, warn};

use dh_store::Transport;

use super::{SaveTrigger, Session};

impl<T: Transport + 'static> Session<T> {
    pub(super) fn start_periodic(&self) {
        let weak = Arc::downgrade(&self.inner);
        let period = self.inner.options.auto_sync.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                Session { inner }.periodic_fired().await;
            }
        });
        self.timers().periodic = Some(handle);
    }

    async fn periodic_fired(&self) {
        if !self.has_unsaved_changes() {
            return;
        }
        if let Err(e) = self.persist(SaveTrigger::Periodic).await {
            warn!(error = %e.summary(), "auto-sync failed");
        }
    }

    /// Start a debounce timer tagged `generation`. Earlier timers keep
    /// running and do nothing when they fire.
    pub(super) fn schedule_debounce(&self, generation: u64) {
        let weak = Arc::downgrade(&self.inner);
        let delay = self.inner.options.debounce;

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                Session { inner }.debounce_fired(generation).await;
            }
        });
        self.timers().debounce = Some(handle);
    }

    async fn debounce_fired(&self, generation: u64) {
        {
            let state = self.lock();
            if state.debounce_generation != generation || !state.dirty {
                debug!(generation, "debounce superseded");
                return;
            }
        }
        if let Err(e) = self.persist(SaveTrigger::Debounce).await {
            warn!(error = %e.summary(), "background save failed");
        }
    }

    pub(super) fn schedule_status_clear(&self, generation: u64, linger: Duration) {
        let weak = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            sleep(linger).await;
            if let Some(inner) = weak.upgrade() {
                let session = Session { inner };
                let mut state = session.lock();
                if state.status_generation == generation {
                    state.status.clear();
                    session.publish(&state);
                }
            }
        });
    }
}
