//! Decoded peer protocol messages the synchronizer reacts to.

use serde::{Deserialize, Serialize};

/// A new-head announcement from a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announce {
    /// Block number of the announced head.
    pub head_number: u64,
    /// Depth of the chain reorganization behind the new head.
    ///
    /// Zero for a simple extension of the chain.
    pub reorg_depth: u64,
}

impl Announce {
    /// Announce a head that extends the current chain.
    pub fn new_head(head_number: u64) -> Self {
        Self {
            head_number,
            reorg_depth: 0,
        }
    }

    /// Whether the announcement implies a chain reorganization.
    ///
    /// Reorg announcements are currently ignored by the dispatcher;
    /// recovery semantics are unresolved (see DESIGN.md).
    pub fn is_reorg(&self) -> bool {
        self.reorg_depth != 0
    }
}

/// Protocol messages delivered to the synchronizer by the wire layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// A peer advertised a new chain head.
    Announce(Announce),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_head_is_not_reorg() {
        assert!(!Announce::new_head(42).is_reorg());
    }

    #[test]
    fn test_nonzero_depth_is_reorg() {
        let announce = Announce {
            head_number: 42,
            reorg_depth: 3,
        };
        assert!(announce.is_reorg());
    }
}
