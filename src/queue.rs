//! Offline write queue
//!
//! Failed writes are appended in FIFO order and replayed by [`OfflineQueue::flush`].
//! There is no backoff and no attempt limit; a flush sends every queued
//! operation once and keeps the failures, in order, for the next pass.

use crate::error::Result;
use crate::models::{Action, PendingOperation, SyncStatus};
use crate::reconcile;
use crate::remote::SheetRemote;
use crate::store::LocalStore;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub attempted: usize,
    pub synced: usize,
    pub remaining: usize,
}

impl FlushReport {
    pub fn is_clean(&self) -> bool {
        self.remaining == 0
    }
}

pub struct OfflineQueue {
    store: LocalStore,
}

impl OfflineQueue {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn pending(&self) -> Vec<PendingOperation> {
        self.store.load_queue()
    }

    pub fn len(&self) -> usize {
        self.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn enqueue(&self, op: PendingOperation) -> Result<()> {
        let mut queue = self.store.load_queue();
        warn!("queued {} {:?} ({} pending)", op.action(), op.word(), queue.len() + 1);
        queue.push(op);
        self.store.save_queue(&queue)
    }

    /// Drop every queued operation naming `word`; returns how many went
    pub fn discard_word(&self, word: &str) -> Result<usize> {
        let queue = self.store.load_queue();
        let before = queue.len();
        let kept: Vec<_> = queue.into_iter().filter(|op| !op.matches_word(word)).collect();
        let dropped = before - kept.len();
        if dropped > 0 {
            self.store.save_queue(&kept)?;
        }
        Ok(dropped)
    }

    pub fn clear(&self) -> Result<()> {
        info!("pending queue cleared");
        self.store.clear_queue()
    }

    pub fn status(&self, word: &str) -> SyncStatus {
        reconcile::sync_status(&self.store.load_queue(), word)
    }

    /// One pass over the whole queue; `timeout_for` bounds each send by its action
    pub async fn flush<R, F>(&self, remote: &R, timeout_for: F) -> Result<FlushReport>
    where
        R: SheetRemote,
        F: Fn(Action) -> Duration,
    {
        let queue = self.store.load_queue();
        if queue.is_empty() {
            debug!("flush: queue is empty, nothing to sync");
            return Ok(FlushReport::default());
        }

        info!("flush: attempting {} pending operations", queue.len());
        let attempted = queue.len();
        let mut failed = Vec::new();
        for op in queue {
            match remote.send(&op, timeout_for(op.action())).await {
                Ok(()) => debug!("flush: {} {:?} synced", op.action(), op.word()),
                Err(e) => {
                    debug!("flush: {} {:?} still pending: {}", op.action(), op.word(), e);
                    failed.push(op);
                }
            }
        }

        let synced = attempted - failed.len();
        let mut remaining = failed;
        // Writes queued while the pass was running go after the survivors
        let latest = self.store.load_queue();
        if latest.len() > attempted {
            remaining.extend(latest.into_iter().skip(attempted));
        }

        self.store.save_queue(&remaining)?;
        let report = FlushReport {
            attempted,
            synced,
            remaining: remaining.len(),
        };
        info!(
            "flush: {} synced, {} remaining",
            report.synced, report.remaining
        );
        Ok(report)
    }
}
