//! Per-peer state as advertised by the connection pool.
//!
//! The sync core never mutates peers. It reads snapshots of this data
//! once per selection pass; repeated reads are expected to observe
//! updates made by the peer session handlers.

use serde::{Deserialize, Serialize};

use crate::types::{PeerId, TotalDifficulty};

/// A peer's advertised chain head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadInfo {
    /// Block number of the advertised head.
    pub number: u64,
    /// Total difficulty accumulated up to that head.
    pub total_difficulty: TotalDifficulty,
}

impl HeadInfo {
    /// Create a new head descriptor.
    pub fn new(number: u64, total_difficulty: TotalDifficulty) -> Self {
        Self {
            number,
            total_difficulty,
        }
    }
}

/// Snapshot of a connected peer's capabilities and head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    /// Session identifier assigned by the connection pool.
    pub id: PeerId,
    /// Whether the peer negotiated header service.
    pub serves_headers: bool,
    /// Whether the session was initiated by the remote side.
    ///
    /// Inbound sessions never negotiated capabilities with us, so they
    /// are not trusted as sync origins.
    pub inbound: bool,
    /// The peer's advertised chain head.
    pub head: HeadInfo,
}

impl PeerInfo {
    /// Create a peer snapshot.
    pub fn new(id: PeerId, serves_headers: bool, inbound: bool, head: HeadInfo) -> Self {
        Self {
            id,
            serves_headers,
            inbound,
            head,
        }
    }

    /// Whether this peer qualifies as a sync origin candidate.
    ///
    /// Only outbound sessions that serve headers are trusted.
    pub fn eligible(&self) -> bool {
        self.serves_headers && !self.inbound
    }
}
