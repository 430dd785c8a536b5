//! Chain head abstraction.
//!
//! The local header store is an external collaborator; the sync core
//! only needs to open it and read its head. Headers are written by the
//! download pipeline, never by the core.

use async_trait::async_trait;

use lumen_core::ChainHead;

use crate::error::Result;

/// Read-only view of the local chain head.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Open the underlying store. Idempotent.
    ///
    /// Fails with [`SyncError::DependencyOpen`](crate::SyncError::DependencyOpen)
    /// if the store cannot be initialized.
    async fn open(&self) -> Result<()>;

    /// Current head of the local chain.
    async fn head(&self) -> ChainHead;
}

/// A simple in-memory chain head for testing.
pub mod memory {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::error::SyncError;

    struct Inner {
        head: ChainHead,
        opened: bool,
        fail_open: bool,
    }

    /// In-memory [`ChainReader`] implementation.
    ///
    /// Clones share state, so a fetcher mock can advance the head that
    /// the synchronizer reads.
    #[derive(Clone)]
    pub struct MemoryChain {
        inner: Arc<RwLock<Inner>>,
    }

    impl MemoryChain {
        /// Create a chain at the given head.
        pub fn new(head: ChainHead) -> Self {
            Self {
                inner: Arc::new(RwLock::new(Inner {
                    head,
                    opened: false,
                    fail_open: false,
                })),
            }
        }

        /// Create an empty chain (genesis only).
        pub fn empty() -> Self {
            Self::new(ChainHead::genesis())
        }

        /// Make subsequent `open` calls fail.
        pub async fn fail_open(&self, fail: bool) {
            self.inner.write().await.fail_open = fail;
        }

        /// Whether `open` has been called successfully.
        pub async fn is_open(&self) -> bool {
            self.inner.read().await.opened
        }

        /// Replace the head, simulating headers written by the pipeline.
        pub async fn set_head(&self, head: ChainHead) {
            self.inner.write().await.head = head;
        }
    }

    #[async_trait]
    impl ChainReader for MemoryChain {
        async fn open(&self) -> Result<()> {
            let mut inner = self.inner.write().await;
            if inner.fail_open {
                return Err(SyncError::DependencyOpen {
                    dependency: "chain",
                    reason: "simulated open failure".into(),
                });
            }
            inner.opened = true;
            Ok(())
        }

        async fn head(&self) -> ChainHead {
            self.inner.read().await.head
        }
    }
}
