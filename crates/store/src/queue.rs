// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Write serialization queue.
//!
//! Every write against the repository runs through one FIFO drained by a
//! single worker task, so at most one write is in flight and writes land in
//! the order they were requested. Each submitted job carries its own
//! completion channel: a failed job resolves only its own caller, and the
//! worker moves on to the next job.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::{Result, StoreError};

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Handle to the queue. Cloning shares the same worker.
///
/// The worker stops once every handle has been dropped and the jobs already
/// queued have run.
#[derive(Clone)]
pub struct WriteQueue {
    tx: mpsc::UnboundedSender<Job>,
    pending: Arc<AtomicUsize>,
}

impl WriteQueue {
    /// Start the worker on the current tokio runtime.
    ///
    /// Must be called from within a runtime.
    pub fn start() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(rx));
        WriteQueue {
            tx,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Append `work` to the queue.
    ///
    /// The job is enqueued before this returns, so the order of `submit`
    /// calls is the order of execution even if the returned futures are
    /// polled in a different order or not at all.
    pub fn submit<F, T>(&self, work: F) -> impl Future<Output = Result<T>> + Send + 'static
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let pending = Arc::clone(&self.pending);
        pending.fetch_add(1, Ordering::SeqCst);

        let job_pending = Arc::clone(&pending);
        let job: Job = Box::pin(async move {
            let outcome = work.await;
            job_pending.fetch_sub(1, Ordering::SeqCst);
            // The caller may have stopped waiting; the write still happened.
            let _ = done_tx.send(outcome);
        });

        let accepted = self.tx.send(job).is_ok();
        if !accepted {
            pending.fetch_sub(1, Ordering::SeqCst);
        }

        async move {
            if !accepted {
                return Err(StoreError::QueueClosed);
            }
            done_rx.await.map_err(|_| StoreError::QueueClosed)?
        }
    }

    /// Number of jobs queued or running.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}

async fn run_worker(mut rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = rx.recv().await {
        job.await;
    }
    debug!("write queue closed");
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
