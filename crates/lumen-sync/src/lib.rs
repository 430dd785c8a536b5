//! # Lumen Sync
//!
//! Sync orchestration for the Lumen light client.
//!
//! ## Overview
//!
//! A light node stores no chain data beyond headers. To catch up to the
//! network it must pick a peer to trust as the source of the best-known
//! head (the *origin*), work out which headers it is missing, and hand
//! that range to a download pipeline.
//!
//! This crate is that decision core. The collaborators it coordinates
//! are behind traits:
//!
//! - [`PeerView`] - the connection pool's per-peer capability flags and
//!   advertised heads
//! - [`ChainReader`] - the local header store's head
//! - [`HeaderFetcher`] - the batched, retrying download pipeline
//!
//! ## Flow
//!
//! ```text
//! peer message         Synchronizer
//!   Announce ------------> handle
//!                            |  no explicit target?
//!                            v
//!                       find_origin  (poll peers until one qualifies
//!                            |        or syncing is cancelled)
//!                            v
//!                       fetch: first = local head + 1
//!                            |  SyncTask { first, target }
//!                            v
//!                       HeaderFetcher::add + start
//!                            |
//!                            v
//!                       SyncEvent::Synchronized { count }
//! ```
//!
//! ## Cancellation
//!
//! The syncing flag on [`SyncState`] is the sole cancellation signal.
//! Every suspension point (the origin search's polling wait, the
//! fetcher completion wait) re-checks it after resuming, so `stop`
//! takes effect within one polling interval.

pub mod chain;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod lifecycle;
pub mod messages;
pub mod origin;
pub mod peers;
pub mod synchronizer;

pub use chain::ChainReader;
pub use error::{Result, SyncError};
pub use events::{event_channel, SyncEvent};
pub use fetcher::{FetchFailure, HeaderFetcher};
pub use lifecycle::{CancelHandle, SyncStage, SyncState};
pub use messages::{Announce, Message};
pub use origin::select_best;
pub use peers::PeerView;
pub use synchronizer::{SyncConfig, Synchronizer};
