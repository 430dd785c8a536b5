//! Header range fetcher abstraction.
//!
//! The fetcher is the external download pipeline: it takes bounded
//! header ranges, performs the batched network fetches and storage
//! writes, and retries failed batches under its own policy. The sync
//! core only schedules work on it and awaits completion.

use async_trait::async_trait;

use lumen_core::{PeerId, SyncTask};

use crate::error::{Result, SyncError};

/// A per-task, per-peer failure reported by the fetcher.
///
/// These are absorbed by the synchronizer: logged with context, never
/// fatal to the sync cycle. The fetcher retries or reassigns the work
/// internally.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    /// The task that failed.
    pub task: SyncTask,
    /// The peer it was assigned to.
    pub peer: PeerId,
    /// What went wrong.
    pub error: SyncError,
}

/// Control surface of the header download pipeline.
#[async_trait]
pub trait HeaderFetcher: Send + Sync {
    /// Open the fetcher. Idempotent.
    async fn open(&self) -> Result<()>;

    /// Queue a header range for download.
    async fn add(&self, task: SyncTask) -> Result<()>;

    /// Run the queued tasks to completion.
    ///
    /// Resolves once every queued task has completed or the fetcher was
    /// stopped.
    async fn start(&self) -> Result<()>;

    /// Cancel in-flight work. Resolves on acknowledgement.
    async fn stop(&self) -> Result<()>;

    /// Take the failures accumulated since the last drain.
    async fn drain_failures(&self) -> Vec<FetchFailure>;
}

/// A simple in-memory fetcher for testing.
pub mod memory {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use lumen_core::{ChainHead, TotalDifficulty};

    use crate::chain::memory::MemoryChain;
    use crate::chain::ChainReader;

    struct Inner {
        opened: bool,
        started: usize,
        stopped: usize,
        queued: Vec<SyncTask>,
        completed: Vec<SyncTask>,
        failures: Vec<FetchFailure>,
        chain: Option<MemoryChain>,
    }

    /// In-memory [`HeaderFetcher`] implementation.
    ///
    /// Records every submitted task. When linked to a [`MemoryChain`],
    /// `start` advances the chain head to each task's last header,
    /// simulating the pipeline persisting what it downloaded.
    #[derive(Clone)]
    pub struct MemoryFetcher {
        inner: Arc<RwLock<Inner>>,
    }

    impl MemoryFetcher {
        /// Create a fetcher that only records tasks.
        pub fn new() -> Self {
            Self::build(None)
        }

        /// Create a fetcher that writes completed ranges to `chain`.
        pub fn with_chain(chain: MemoryChain) -> Self {
            Self::build(Some(chain))
        }

        fn build(chain: Option<MemoryChain>) -> Self {
            Self {
                inner: Arc::new(RwLock::new(Inner {
                    opened: false,
                    started: 0,
                    stopped: 0,
                    queued: Vec::new(),
                    completed: Vec::new(),
                    failures: Vec::new(),
                    chain,
                })),
            }
        }

        /// Script a failure to be drained after the next `start`.
        pub async fn push_failure(&self, failure: FetchFailure) {
            self.inner.write().await.failures.push(failure);
        }

        /// Whether `open` has been called.
        pub async fn is_open(&self) -> bool {
            self.inner.read().await.opened
        }

        /// How many times `start` has been called.
        pub async fn start_count(&self) -> usize {
            self.inner.read().await.started
        }

        /// How many times `stop` has been called.
        pub async fn stop_count(&self) -> usize {
            self.inner.read().await.stopped
        }

        /// Every task that has completed a `start` cycle, in order.
        pub async fn completed(&self) -> Vec<SyncTask> {
            self.inner.read().await.completed.clone()
        }
    }

    impl Default for MemoryFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HeaderFetcher for MemoryFetcher {
        async fn open(&self) -> Result<()> {
            self.inner.write().await.opened = true;
            Ok(())
        }

        async fn add(&self, task: SyncTask) -> Result<()> {
            let mut inner = self.inner.write().await;
            if !inner.opened {
                return Err(SyncError::Fetcher("fetcher not open".into()));
            }
            inner.queued.push(task);
            Ok(())
        }

        async fn start(&self) -> Result<()> {
            let (tasks, chain) = {
                let mut inner = self.inner.write().await;
                inner.started += 1;
                let tasks = std::mem::take(&mut inner.queued);
                inner.completed.extend(tasks.iter().copied());
                (tasks, inner.chain.clone())
            };
            if let Some(chain) = chain {
                for task in tasks {
                    let head = chain.head().await;
                    chain
                        .set_head(ChainHead::new(
                            task.last(),
                            head.total_difficulty + TotalDifficulty::from(task.count()),
                            head.latest_hash,
                        ))
                        .await;
                }
            }
            Ok(())
        }

        async fn stop(&self) -> Result<()> {
            let mut inner = self.inner.write().await;
            inner.stopped += 1;
            inner.queued.clear();
            Ok(())
        }

        async fn drain_failures(&self) -> Vec<FetchFailure> {
            std::mem::take(&mut self.inner.write().await.failures)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryFetcher;
    use super::*;
    use crate::chain::memory::MemoryChain;
    use crate::chain::ChainReader;

    #[tokio::test]
    async fn test_memory_fetcher_requires_open() {
        let fetcher = MemoryFetcher::new();
        let task = SyncTask::new(1, 10).unwrap();
        assert!(fetcher.add(task).await.is_err());
        fetcher.open().await.unwrap();
        assert!(fetcher.add(task).await.is_ok());
    }

    #[tokio::test]
    async fn test_memory_fetcher_records_completed_tasks() {
        let fetcher = MemoryFetcher::new();
        fetcher.open().await.unwrap();
        fetcher.add(SyncTask::new(1, 5).unwrap()).await.unwrap();
        fetcher.start().await.unwrap();
        let completed = fetcher.completed().await;
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].last(), 5);
    }

    #[tokio::test]
    async fn test_memory_fetcher_advances_linked_chain() {
        let chain = MemoryChain::empty();
        let fetcher = MemoryFetcher::with_chain(chain.clone());
        fetcher.open().await.unwrap();
        fetcher.add(SyncTask::new(1, 10).unwrap()).await.unwrap();
        fetcher.start().await.unwrap();
        assert_eq!(chain.head().await.number, 10);
    }

    #[tokio::test]
    async fn test_memory_fetcher_drain_failures_empties() {
        let fetcher = MemoryFetcher::new();
        fetcher
            .push_failure(FetchFailure {
                task: SyncTask::new(1, 2).unwrap(),
                peer: PeerId::ZERO,
                error: SyncError::Fetcher("boom".into()),
            })
            .await;
        assert_eq!(fetcher.drain_failures().await.len(), 1);
        assert!(fetcher.drain_failures().await.is_empty());
    }
}
