//! Origin peer selection.
//!
//! The origin is the peer trusted as the source of the best-known chain
//! head for one sync cycle: the peer advertising the highest total
//! difficulty, provided it at least matches our own.

use std::time::Duration;

use lumen_core::{PeerInfo, TotalDifficulty};

use crate::chain::ChainReader;
use crate::lifecycle::SyncState;
use crate::peers::PeerView;

/// Single-pass scan for the heaviest candidate.
///
/// Deliberately iterates the full peer list, not just the eligible
/// subset: eligibility gates whether a scan runs at all (see
/// [`find_origin`]), while the scan itself compares every connected
/// peer's weight. The first candidate must carry at least our local
/// total difficulty; after that, only a strictly greater weight
/// displaces the current best, so ties keep the earliest peer.
pub fn select_best(peers: &[PeerInfo], local_td: TotalDifficulty) -> Option<&PeerInfo> {
    let mut best: Option<&PeerInfo> = None;
    for peer in peers {
        let td = peer.head.total_difficulty;
        match best {
            None if td >= local_td => best = Some(peer),
            Some(current) if td > current.head.total_difficulty => best = Some(peer),
            _ => {}
        }
    }
    best
}

/// Poll the peer set until an origin qualifies or syncing is cancelled.
///
/// Suspends for one polling interval between passes whenever no peer
/// serves headers on an outbound session, or no peer's weight reaches
/// our own. Returns the chosen peer and its advertised head number, or
/// `None` if syncing was cancelled first. Never spins without yielding.
pub(crate) async fn find_origin<P, C>(
    peers: &P,
    chain: &C,
    state: &SyncState,
    interval: Duration,
) -> Option<(PeerInfo, u64)>
where
    P: PeerView,
    C: ChainReader,
{
    loop {
        if !state.is_syncing() {
            return None;
        }
        let snapshot = peers.peers().await;
        if !snapshot.iter().any(PeerInfo::eligible) {
            if !state.wait_interval(interval).await {
                return None;
            }
            continue;
        }
        let local_td = chain.head().await.total_difficulty;
        if let Some(best) = select_best(&snapshot, local_td) {
            let height = best.head.number;
            tracing::debug!(peer = %best.id, height, "selected origin peer");
            return Some((best.clone(), height));
        }
        if !state.wait_interval(interval).await {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{HeadInfo, PeerId};

    fn td(value: u64) -> TotalDifficulty {
        TotalDifficulty::from(value)
    }

    fn peer(byte: u8, number: u64, weight: u64) -> PeerInfo {
        PeerInfo::new(
            PeerId::from_bytes([byte; 32]),
            true,
            false,
            HeadInfo::new(number, td(weight)),
        )
    }

    #[test]
    fn test_select_best_empty() {
        assert!(select_best(&[], td(0)).is_none());
    }

    #[test]
    fn test_select_best_picks_heaviest() {
        let peers = vec![peer(1, 9, 90), peer(2, 10, 100), peer(3, 8, 80)];
        let best = select_best(&peers, td(0)).unwrap();
        assert_eq!(best.id, PeerId::from_bytes([2; 32]));
    }

    #[test]
    fn test_select_best_requires_local_td() {
        // All peers lighter than our own chain: no candidate.
        let peers = vec![peer(1, 9, 90), peer(2, 10, 100)];
        assert!(select_best(&peers, td(101)).is_none());
    }

    #[test]
    fn test_select_best_ties_keep_earliest() {
        let peers = vec![peer(1, 10, 100), peer(2, 10, 100)];
        let best = select_best(&peers, td(0)).unwrap();
        assert_eq!(best.id, PeerId::from_bytes([1; 32]));
    }

    #[test]
    fn test_select_best_scans_full_list() {
        // The scan is over all connected peers: a heavier peer that is
        // not itself eligible still displaces the current best.
        let mut heavy_inbound = peer(2, 20, 200);
        heavy_inbound.inbound = true;
        let peers = vec![peer(1, 10, 100), heavy_inbound];
        let best = select_best(&peers, td(0)).unwrap();
        assert_eq!(best.id, PeerId::from_bytes([2; 32]));
    }

    #[test]
    fn test_select_best_equal_to_local_qualifies() {
        let peers = vec![peer(1, 10, 100)];
        assert!(select_best(&peers, td(100)).is_some());
    }
}
