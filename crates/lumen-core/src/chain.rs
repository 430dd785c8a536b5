//! Local chain head state.
//!
//! Owned and mutated by the header download pipeline; the sync core
//! only reads it to bound the ranges it requests.

use serde::{Deserialize, Serialize};

use crate::types::{BlockHash, TotalDifficulty};

/// The local chain's current head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainHead {
    /// Height of the latest stored header.
    pub number: u64,
    /// Total difficulty accumulated up to the head.
    pub total_difficulty: TotalDifficulty,
    /// Hash of the latest stored header.
    pub latest_hash: BlockHash,
}

impl ChainHead {
    /// Create a chain head descriptor.
    pub fn new(number: u64, total_difficulty: TotalDifficulty, latest_hash: BlockHash) -> Self {
        Self {
            number,
            total_difficulty,
            latest_hash,
        }
    }

    /// Head of an empty chain (genesis only, zero difficulty).
    pub fn genesis() -> Self {
        Self {
            number: 0,
            total_difficulty: TotalDifficulty::zero(),
            latest_hash: BlockHash::ZERO,
        }
    }
}
