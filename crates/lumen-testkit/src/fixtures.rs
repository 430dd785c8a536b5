//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::time::Duration;

use lumen_core::{BlockHash, ChainHead, HeadInfo, PeerId, PeerInfo, TotalDifficulty};
use lumen_sync::chain::memory::MemoryChain;
use lumen_sync::fetcher::memory::MemoryFetcher;
use lumen_sync::peers::memory::MemoryPeerPool;
use lumen_sync::{SyncConfig, SyncEvent, Synchronizer};

use tokio::sync::mpsc;

/// Polling interval used by harness synchronizers, short enough that
/// cancellation tests finish quickly.
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A synchronizer wired to in-memory ports.
///
/// The fetcher is linked to the chain, so completed tasks advance the
/// head that the synchronizer reads.
pub struct SyncHarness {
    pub sync: Synchronizer<MemoryPeerPool, MemoryChain, MemoryFetcher>,
    pub events: mpsc::UnboundedReceiver<SyncEvent>,
    pub peers: MemoryPeerPool,
    pub chain: MemoryChain,
    pub fetcher: MemoryFetcher,
}

impl SyncHarness {
    /// Create a harness over an empty chain, opened and started.
    pub async fn new() -> Self {
        Self::at_head(ChainHead::genesis()).await
    }

    /// Create a harness with the local chain at the given head.
    pub async fn at_head(head: ChainHead) -> Self {
        let peers = MemoryPeerPool::new();
        let chain = MemoryChain::new(head);
        let fetcher = MemoryFetcher::with_chain(chain.clone());
        let (mut sync, events) = Synchronizer::new(
            SyncConfig {
                poll_interval: TEST_POLL_INTERVAL,
            },
            peers.clone(),
            chain.clone(),
            fetcher.clone(),
        );
        sync.open().await.expect("memory ports open");
        sync.start();
        Self {
            sync,
            events,
            peers,
            chain,
            fetcher,
        }
    }

    /// Next event, if one has already been emitted.
    pub fn try_event(&mut self) -> Option<SyncEvent> {
        self.events.try_recv().ok()
    }
}

/// Local chain head at `number` with the given total difficulty.
pub fn chain_at(number: u64, total_difficulty: u64) -> ChainHead {
    ChainHead::new(
        number,
        TotalDifficulty::from(total_difficulty),
        BlockHash::from_bytes([number as u8; 32]),
    )
}

fn peer_with(
    byte: u8,
    serves_headers: bool,
    inbound: bool,
    number: u64,
    total_difficulty: u64,
) -> PeerInfo {
    PeerInfo::new(
        PeerId::from_bytes([byte; 32]),
        serves_headers,
        inbound,
        HeadInfo::new(number, TotalDifficulty::from(total_difficulty)),
    )
}

/// An eligible origin candidate: outbound session serving headers.
pub fn serving_peer(byte: u8, number: u64, total_difficulty: u64) -> PeerInfo {
    peer_with(byte, true, false, number, total_difficulty)
}

/// An inbound session; never trusted as an origin.
pub fn inbound_peer(byte: u8, number: u64, total_difficulty: u64) -> PeerInfo {
    peer_with(byte, true, true, number, total_difficulty)
}

/// An outbound session that does not serve headers.
pub fn non_serving_peer(byte: u8, number: u64, total_difficulty: u64) -> PeerInfo {
    peer_with(byte, false, false, number, total_difficulty)
}
