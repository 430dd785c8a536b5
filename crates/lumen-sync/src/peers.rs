//! Peer capability view abstraction.
//!
//! The connection pool owns peer sessions and their capability flags;
//! the sync core only lists them. Each call returns a fresh snapshot,
//! so repeated polls observe updates made by the session handlers.

use async_trait::async_trait;

use lumen_core::PeerInfo;

use crate::error::Result;

/// Read-only view of the currently connected peers.
#[async_trait]
pub trait PeerView: Send + Sync {
    /// Open the underlying pool. Idempotent.
    async fn open(&self) -> Result<()>;

    /// Snapshot of all currently connected peers.
    async fn peers(&self) -> Vec<PeerInfo>;
}

/// A simple in-memory peer pool for testing.
pub mod memory {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use lumen_core::PeerId;

    use crate::error::SyncError;

    struct Inner {
        peers: Vec<PeerInfo>,
        opened: bool,
        fail_open: bool,
    }

    /// In-memory [`PeerView`] implementation.
    ///
    /// Clones share state, so tests can add or update peers while an
    /// origin search is polling.
    #[derive(Clone)]
    pub struct MemoryPeerPool {
        inner: Arc<RwLock<Inner>>,
    }

    impl MemoryPeerPool {
        /// Create an empty pool.
        pub fn new() -> Self {
            Self {
                inner: Arc::new(RwLock::new(Inner {
                    peers: Vec::new(),
                    opened: false,
                    fail_open: false,
                })),
            }
        }

        /// Make subsequent `open` calls fail.
        pub async fn fail_open(&self, fail: bool) {
            self.inner.write().await.fail_open = fail;
        }

        /// Whether `open` has been called successfully.
        pub async fn is_open(&self) -> bool {
            self.inner.read().await.opened
        }

        /// Add a peer to the pool.
        pub async fn add(&self, peer: PeerInfo) {
            self.inner.write().await.peers.push(peer);
        }

        /// Replace the whole peer set.
        pub async fn set(&self, peers: Vec<PeerInfo>) {
            self.inner.write().await.peers = peers;
        }

        /// Remove a peer by session id.
        pub async fn remove(&self, id: PeerId) {
            self.inner.write().await.peers.retain(|p| p.id != id);
        }
    }

    impl Default for MemoryPeerPool {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl PeerView for MemoryPeerPool {
        async fn open(&self) -> Result<()> {
            let mut inner = self.inner.write().await;
            if inner.fail_open {
                return Err(SyncError::DependencyOpen {
                    dependency: "peer pool",
                    reason: "simulated open failure".into(),
                });
            }
            inner.opened = true;
            Ok(())
        }

        async fn peers(&self) -> Vec<PeerInfo> {
            self.inner.read().await.peers.clone()
        }
    }
}
