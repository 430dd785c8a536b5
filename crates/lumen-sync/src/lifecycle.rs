//! Sync lifecycle state machine.
//!
//! A standalone value composed into the synchronizer, so alternate sync
//! strategies can reuse the same open/start/stop machinery.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Lifecycle stage of the synchronizer.
///
/// `Stopped` is terminal; it is re-entered only through a fresh
/// [`SyncState::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    /// Dependencies not yet opened.
    Closed,
    /// Dependencies opened, not yet syncing.
    Open,
    /// Actively syncing: the announcement reaction path is enabled.
    Running,
    /// Stopped after running.
    Stopped,
}

/// Lifecycle state plus the cooperative cancellation flag.
///
/// The `syncing` flag is the sole cancellation signal: every polling or
/// suspension point in the core re-checks it after resuming and aborts
/// promptly once it drops.
#[derive(Debug)]
pub struct SyncState {
    stage: SyncStage,
    syncing_tx: Arc<watch::Sender<bool>>,
    syncing_rx: watch::Receiver<bool>,
}

/// A clonable handle that drops the syncing flag from another task.
///
/// Cancelling unblocks an in-flight origin search; the owner of the
/// synchronizer should still call `stop` afterwards to finish the
/// lifecycle transition and stop the fetcher.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    syncing_tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Drop the syncing flag.
    pub fn cancel(&self) {
        self.syncing_tx.send_replace(false);
    }
}

impl SyncState {
    /// Create a closed, non-syncing state.
    pub fn new() -> Self {
        let (syncing_tx, syncing_rx) = watch::channel(false);
        Self {
            stage: SyncStage::Closed,
            syncing_tx: Arc::new(syncing_tx),
            syncing_rx,
        }
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> SyncStage {
        self.stage
    }

    /// Mark dependencies opened. Idempotent if already open or running.
    pub fn open(&mut self) {
        if matches!(self.stage, SyncStage::Closed | SyncStage::Stopped) {
            self.stage = SyncStage::Open;
        }
    }

    /// Enter the running stage and raise the syncing flag.
    pub fn start(&mut self) {
        self.stage = SyncStage::Running;
        self.syncing_tx.send_replace(true);
    }

    /// Drop the syncing flag and enter the stopped stage.
    pub fn stop(&mut self) {
        self.syncing_tx.send_replace(false);
        self.stage = SyncStage::Stopped;
    }

    /// Whether a sync is currently active.
    pub fn is_syncing(&self) -> bool {
        *self.syncing_rx.borrow()
    }

    /// Subscribe to changes of the syncing flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.syncing_rx.clone()
    }

    /// Handle for cancelling from outside the owning task.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            syncing_tx: Arc::clone(&self.syncing_tx),
        }
    }

    /// Suspend for one polling interval, waking early on cancellation.
    ///
    /// Returns `true` if the interval elapsed with the syncing flag
    /// still raised, `false` if syncing was cancelled. Cancellation is
    /// therefore observed within at most one interval.
    pub async fn wait_interval(&self, interval: Duration) -> bool {
        if !self.is_syncing() {
            return false;
        }
        let mut rx = self.subscribe();
        let sleep = tokio::time::sleep(interval);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                _ = &mut sleep => return *rx.borrow(),
                changed = rx.changed() => {
                    if changed.is_err() || !*rx.borrow() {
                        return false;
                    }
                }
            }
        }
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}
