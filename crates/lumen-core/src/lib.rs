//! # Lumen Core
//!
//! Pure data model for the Lumen light client: peer descriptors, the
//! local chain head, and header sync tasks.
//!
//! This crate contains no I/O, no networking, no async. It is the shared
//! vocabulary between the sync orchestrator and the external collaborators
//! it coordinates (peer pool, header store, header fetcher).
//!
//! ## Key Types
//!
//! - [`PeerId`] - 32-byte peer session identifier
//! - [`PeerInfo`] - per-peer capability flags and advertised head
//! - [`ChainHead`] - local chain height, total difficulty, latest hash
//! - [`SyncTask`] - inclusive range of header numbers to fetch

pub mod chain;
pub mod peer;
pub mod task;
pub mod types;

pub use chain::ChainHead;
pub use peer::{HeadInfo, PeerInfo};
pub use task::SyncTask;
pub use types::{BlockHash, PeerId, TotalDifficulty};
