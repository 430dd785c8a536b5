//! The light sync orchestrator.
//!
//! Ties the lifecycle state machine, the origin selector, and the
//! external ports together: picks an origin peer, computes the missing
//! header range, and drives the download pipeline to completion.

use std::time::Duration;

use tokio::sync::mpsc;

use lumen_core::{PeerId, SyncTask};

use crate::chain::ChainReader;
use crate::error::Result;
use crate::events::{event_channel, SyncEvent};
use crate::fetcher::HeaderFetcher;
use crate::lifecycle::{SyncStage, SyncState};
use crate::messages::Message;
use crate::origin::find_origin;
use crate::peers::PeerView;

/// Configuration for sync behavior.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// How long the origin search suspends between peer-set polls.
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Light-client sync orchestrator.
///
/// All mutating entry points take `&mut self`, so announcements are
/// handled strictly in arrival order and at most one origin search and
/// one active task exist at a time. A second trigger arriving during a
/// sync waits for the first to finish rather than racing it.
pub struct Synchronizer<P, C, F> {
    config: SyncConfig,
    state: SyncState,
    peers: P,
    chain: C,
    fetcher: F,
    events: mpsc::UnboundedSender<SyncEvent>,
}

impl<P, C, F> Synchronizer<P, C, F>
where
    P: PeerView,
    C: ChainReader,
    F: HeaderFetcher,
{
    /// Create a synchronizer and the receiving end of its event channel.
    pub fn new(
        config: SyncConfig,
        peers: P,
        chain: C,
        fetcher: F,
    ) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (events, rx) = event_channel();
        (
            Self {
                config,
                state: SyncState::new(),
                peers,
                chain,
                fetcher,
                events,
            },
            rx,
        )
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> SyncStage {
        self.state.stage()
    }

    /// Whether a sync is currently active.
    pub fn is_syncing(&self) -> bool {
        self.state.is_syncing()
    }

    /// Handle for cancelling an in-flight origin search from outside
    /// the task that owns the synchronizer.
    pub fn cancel_handle(&self) -> crate::lifecycle::CancelHandle {
        self.state.cancel_handle()
    }

    /// Open the chain head state and the peer capability view.
    ///
    /// Idempotent. A failure of either dependency is fatal to startup
    /// and propagated to the caller.
    pub async fn open(&mut self) -> Result<()> {
        self.chain.open().await?;
        self.peers.open().await?;
        self.state.open();
        Ok(())
    }

    /// Raise the syncing flag, enabling the announcement reaction path.
    pub fn start(&mut self) {
        self.state.start();
        tracing::info!("sync started");
    }

    /// Stop syncing.
    ///
    /// Returns `false` with no other effect when no sync is active.
    /// Otherwise cancels the in-flight origin search, awaits the
    /// fetcher's stop acknowledgement, and returns `true`.
    pub async fn stop(&mut self) -> Result<bool> {
        if !self.state.is_syncing() {
            return Ok(false);
        }
        // The flag is the cancellation signal: the origin search
        // observes it within one polling interval.
        self.state.stop();
        self.fetcher.stop().await?;
        tracing::info!("sync stopped");
        Ok(true)
    }

    /// Fetch the headers missing up to `target`.
    ///
    /// With no explicit target, the origin selector supplies one;
    /// returns 0 if it was cancelled before a peer qualified, or if the
    /// local chain already reaches the target. Otherwise schedules a
    /// single range task on the fetcher, awaits its completion, and
    /// returns the number of headers requested.
    pub async fn fetch(&mut self, target: Option<u64>) -> Result<u64> {
        let target = match target {
            Some(number) => number,
            None => {
                let found = find_origin(
                    &self.peers,
                    &self.chain,
                    &self.state,
                    self.config.poll_interval,
                )
                .await;
                match found {
                    Some((_, height)) => height,
                    None => return Ok(0),
                }
            }
        };

        let first = self.chain.head().await.number + 1;
        let task = match SyncTask::new(first, target) {
            Some(task) => task,
            // Already caught up, or the target is stale.
            None => return Ok(0),
        };

        self.fetcher.open().await?;
        self.fetcher.add(task).await?;
        self.fetcher.start().await?;

        // Per-task failures are the fetcher's to retry; we only log them.
        for failure in self.fetcher.drain_failures().await {
            tracing::warn!(
                first = failure.task.first(),
                last = failure.task.last(),
                peer = %failure.peer,
                error = %failure.error,
                "header task failed, left to fetcher retry policy"
            );
        }

        Ok(task.count())
    }

    /// Run one fetch cycle and report its result as an event.
    pub async fn sync(&mut self, target: Option<u64>) -> Result<u64> {
        let count = self.fetch(target).await?;
        let _ = self.events.send(SyncEvent::Synchronized { count });
        Ok(count)
    }

    /// React to a decoded peer protocol message.
    ///
    /// Never returns an error to the message source: failures are
    /// re-emitted as [`SyncEvent::Error`].
    pub async fn handle(&mut self, message: Message, peer: PeerId) {
        if let Err(err) = self.handle_inner(message, peer).await {
            tracing::debug!(%peer, error = %err, "message handling failed");
            let _ = self.events.send(SyncEvent::Error(err));
        }
    }

    async fn handle_inner(&mut self, message: Message, peer: PeerId) -> Result<()> {
        // Lazy-open so a message arriving before `open` still works.
        self.chain.open().await?;
        match message {
            Message::Announce(announce) => {
                if announce.is_reorg() {
                    // Reorg recovery is unresolved; see DESIGN.md.
                    tracing::debug!(
                        %peer,
                        depth = announce.reorg_depth,
                        "ignoring reorg announcement"
                    );
                    return Ok(());
                }
                if !self.state.is_syncing() {
                    tracing::debug!(%peer, "announcement received while not syncing");
                    return Ok(());
                }
                self.sync(Some(announce.head_number)).await?;
            }
        }
        Ok(())
    }
}
