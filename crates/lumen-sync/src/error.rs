//! Error types for the sync orchestration core.

use thiserror::Error;

use lumen_core::PeerId;

/// Errors that can occur while orchestrating a sync.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// A dependency failed to open during startup.
    ///
    /// Fatal to the synchronizer: propagated to the caller of `open`.
    #[error("failed to open {dependency}: {reason}")]
    DependencyOpen {
        /// Which dependency refused to open.
        dependency: &'static str,
        /// Underlying reason.
        reason: String,
    },

    /// A single header range failed against a single peer.
    ///
    /// Recovered locally: logged with task and peer context, retried or
    /// reassigned by the fetcher's own policy, never escalated.
    #[error("headers {first}..={last} from peer {peer} failed: {reason}")]
    TaskFetch {
        /// First header number of the failed task.
        first: u64,
        /// Last header number of the failed task.
        last: u64,
        /// Peer the task was assigned to.
        peer: PeerId,
        /// Underlying reason.
        reason: String,
    },

    /// The header fetcher's control surface failed (open/add/start/stop).
    #[error("fetcher error: {0}")]
    Fetcher(String),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
