//! Snapshot subscriptions and off-thread recomputation.
//!
//! The store pushes full snapshots (never diffs) through a [`SnapshotFeed`].
//! A [`Recompute`] worker turns each snapshot into a result with a pure
//! function and hands it back over a channel. Dropping or cancelling the
//! worker joins it, closes its subscription and discards anything not yet
//! delivered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::models::TransactionRecord;

pub type Snapshot = Arc<[TransactionRecord]>;

/// Producer side of a per-user snapshot stream.
#[derive(Default)]
pub struct SnapshotFeed {
    subscribers: Vec<Sender<Snapshot>>,
}

impl SnapshotFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and hand it `current` immediately.
    pub fn subscribe(&mut self, current: Snapshot) -> Receiver<Snapshot> {
        let (tx, rx) = mpsc::channel();
        // The receiver is still in hand, so this send cannot fail.
        let _ = tx.send(current);
        self.subscribers.push(tx);
        rx
    }

    /// Push a fresh snapshot to every live subscriber, pruning closed ones.
    pub fn publish(&mut self, snapshot: Snapshot) {
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
        tracing::debug!(
            subscribers = self.subscribers.len(),
            records = snapshot.len(),
            "published snapshot"
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

/// How often an idle worker checks for cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Consumer side: recomputes on a worker thread once per emission.
pub struct Recompute<T> {
    results: Receiver<T>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Recompute<T> {
    pub fn spawn<F>(snapshots: Receiver<Snapshot>, compute: F) -> Self
    where
        F: Fn(&[TransactionRecord]) -> T + Send + 'static,
    {
        let (tx, results) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let worker = std::thread::spawn(move || {
            tracing::debug!("recompute worker started");
            loop {
                let mut snapshot = match snapshots.recv_timeout(POLL_INTERVAL) {
                    Ok(snapshot) => snapshot,
                    Err(RecvTimeoutError::Timeout) if flag.load(Ordering::Acquire) => break,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };
                // Only the newest queued snapshot matters.
                while let Ok(newer) = snapshots.try_recv() {
                    snapshot = newer;
                }
                if flag.load(Ordering::Acquire) {
                    break;
                }
                let result = compute(&snapshot);
                if flag.load(Ordering::Acquire) || tx.send(result).is_err() {
                    break;
                }
            }
            tracing::debug!("recompute worker exited");
        });

        Self {
            results,
            cancelled,
            worker: Some(worker),
        }
    }
}

impl<T> Recompute<T> {
    /// Latest result available right now, skipping any stale ones.
    /// Always `None` once cancelled.
    pub fn latest(&self) -> Option<T> {
        if self.is_cancelled() {
            return None;
        }
        let mut latest = None;
        loop {
            match self.results.try_recv() {
                Ok(r) => latest = Some(r),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// Wait up to `timeout` for the next result. Always `None` once cancelled.
    pub fn next_timeout(&self, timeout: Duration) -> Option<T> {
        if self.is_cancelled() {
            return None;
        }
        match self.results.recv_timeout(timeout) {
            Ok(r) => Some(r),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Stop the worker and discard results not yet delivered. On return the
    /// worker has exited and its snapshot subscription is closed.
    pub fn cancel(&mut self) {
        if !self.cancelled.load(Ordering::Acquire) {
            tracing::debug!("recompute cancelled");
        }
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("recompute worker panicked");
            }
        }
        while self.results.try_recv().is_ok() {}
    }
}

impl<T> Drop for Recompute<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
