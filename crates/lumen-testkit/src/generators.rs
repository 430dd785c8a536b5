//! Proptest generators for property-based testing.

use proptest::prelude::*;

use lumen_core::{HeadInfo, PeerId, PeerInfo, TotalDifficulty};

/// Generate a random PeerId.
pub fn peer_id() -> impl Strategy<Value = PeerId> {
    any::<[u8; 32]>().prop_map(PeerId::from_bytes)
}

/// Generate a total difficulty across the full u128 range.
pub fn total_difficulty() -> impl Strategy<Value = TotalDifficulty> {
    any::<u128>().prop_map(TotalDifficulty::from)
}

/// Generate an advertised head.
pub fn head_info() -> impl Strategy<Value = HeadInfo> {
    (0u64..=1_000_000, total_difficulty())
        .prop_map(|(number, total_difficulty)| HeadInfo::new(number, total_difficulty))
}

/// Generate a peer with arbitrary capability flags.
pub fn peer_info() -> impl Strategy<Value = PeerInfo> {
    (peer_id(), any::<bool>(), any::<bool>(), head_info()).prop_map(
        |(id, serves_headers, inbound, head)| PeerInfo::new(id, serves_headers, inbound, head),
    )
}

/// Generate a peer set of up to `max` peers.
pub fn peer_set(max: usize) -> impl Strategy<Value = Vec<PeerInfo>> {
    prop::collection::vec(peer_info(), 0..=max)
}
