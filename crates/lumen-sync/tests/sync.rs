//! End-to-end sync cycles over in-memory peers, chain, and fetcher.

use std::time::Duration;

use lumen_core::{PeerId, SyncTask};
use lumen_sync::{Announce, ChainReader, Message, SyncError, SyncEvent};
use lumen_testkit::{chain_at, inbound_peer, non_serving_peer, serving_peer, SyncHarness};

#[tokio::test]
async fn syncs_to_a_single_eligible_peer() {
    let mut harness = SyncHarness::new().await;
    harness.peers.add(serving_peer(1, 10, 100)).await;

    let count = harness.sync.sync(None).await.unwrap();

    assert_eq!(count, 10);
    assert_eq!(harness.chain.head().await.number, 10);
    assert_eq!(
        harness.fetcher.completed().await,
        vec![SyncTask::new(1, 10).unwrap()]
    );
    assert!(matches!(
        harness.try_event(),
        Some(SyncEvent::Synchronized { count: 10 })
    ));
}

#[tokio::test]
async fn does_nothing_when_origin_head_is_stale() {
    // Local chain already past the peer's head; its weight still
    // qualifies it as origin, but there is nothing to fetch.
    let mut harness = SyncHarness::at_head(chain_at(10, 100)).await;
    harness.peers.add(serving_peer(1, 9, 100)).await;

    let count = harness.sync.sync(None).await.unwrap();

    assert_eq!(count, 0);
    assert_eq!(harness.chain.head().await.number, 10);
    assert!(harness.fetcher.completed().await.is_empty());
    assert!(matches!(
        harness.try_event(),
        Some(SyncEvent::Synchronized { count: 0 })
    ));
}

#[tokio::test]
async fn picks_the_heavier_of_two_peers() {
    let mut harness = SyncHarness::new().await;
    harness.peers.add(serving_peer(1, 9, 90)).await;
    harness.peers.add(serving_peer(2, 10, 100)).await;

    let count = harness.sync.sync(None).await.unwrap();

    assert_eq!(count, 10);
    assert_eq!(
        harness.fetcher.completed().await,
        vec![SyncTask::new(1, 10).unwrap()]
    );
}

#[tokio::test]
async fn explicit_targets_at_or_below_local_head_are_noops() {
    let mut harness = SyncHarness::at_head(chain_at(5, 50)).await;
    for target in 0..=5 {
        assert_eq!(harness.sync.fetch(Some(target)).await.unwrap(), 0);
    }
    assert!(harness.fetcher.completed().await.is_empty());

    // One past the head is the first real range.
    assert_eq!(harness.sync.fetch(Some(6)).await.unwrap(), 1);
}

#[tokio::test]
async fn origin_search_blocks_without_an_eligible_peer() {
    let mut harness = SyncHarness::new().await;
    harness.peers.add(inbound_peer(1, 10, 100)).await;
    harness.peers.add(non_serving_peer(2, 10, 100)).await;

    // Neither peer is eligible: the search keeps polling.
    let blocked = tokio::time::timeout(Duration::from_millis(50), harness.sync.fetch(None)).await;
    assert!(blocked.is_err());
}

#[tokio::test]
async fn cancellation_unblocks_the_origin_search() {
    let mut harness = SyncHarness::new().await;
    let handle = harness.sync.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.cancel();
    });

    let count = harness.sync.fetch(None).await.unwrap();
    assert_eq!(count, 0);
    assert!(!harness.sync.is_syncing());
}

#[tokio::test]
async fn origin_search_picks_up_a_late_arriving_peer() {
    let mut harness = SyncHarness::new().await;
    let peers = harness.peers.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        peers.add(serving_peer(1, 8, 80)).await;
    });

    let count = harness.sync.fetch(None).await.unwrap();
    assert_eq!(count, 8);
}

#[tokio::test]
async fn reorg_announcements_never_trigger_a_sync() {
    let mut harness = SyncHarness::new().await;
    harness.peers.add(serving_peer(1, 10, 100)).await;

    let announce = Announce {
        head_number: 50,
        reorg_depth: 1,
    };
    harness
        .sync
        .handle(Message::Announce(announce), PeerId::random())
        .await;

    assert!(harness.fetcher.completed().await.is_empty());
    assert!(harness.try_event().is_none());
}

#[tokio::test]
async fn announcements_are_processed_in_order() {
    let mut harness = SyncHarness::new().await;
    let peer = PeerId::random();

    harness
        .sync
        .handle(Message::Announce(Announce::new_head(5)), peer)
        .await;
    harness
        .sync
        .handle(Message::Announce(Announce::new_head(12)), peer)
        .await;

    // One task per announcement, ranges back to back, no overlap.
    assert_eq!(
        harness.fetcher.completed().await,
        vec![SyncTask::new(1, 5).unwrap(), SyncTask::new(6, 12).unwrap()]
    );
    assert!(matches!(
        harness.try_event(),
        Some(SyncEvent::Synchronized { count: 5 })
    ));
    assert!(matches!(
        harness.try_event(),
        Some(SyncEvent::Synchronized { count: 7 })
    ));
}

#[tokio::test]
async fn announcements_are_ignored_after_stop() {
    let mut harness = SyncHarness::new().await;
    assert!(harness.sync.stop().await.unwrap());
    assert!(!harness.sync.stop().await.unwrap());

    harness
        .sync
        .handle(Message::Announce(Announce::new_head(5)), PeerId::random())
        .await;

    assert!(harness.fetcher.completed().await.is_empty());
    assert!(harness.try_event().is_none());
}

#[tokio::test]
async fn task_failures_are_absorbed_not_fatal() {
    let mut harness = SyncHarness::new().await;
    harness
        .fetcher
        .push_failure(lumen_sync::FetchFailure {
            task: SyncTask::new(1, 10).unwrap(),
            peer: PeerId::random(),
            error: SyncError::Fetcher("peer disconnected mid-batch".into()),
        })
        .await;

    harness
        .sync
        .handle(Message::Announce(Announce::new_head(10)), PeerId::random())
        .await;

    // The cycle still completes and reports the scheduled count.
    assert!(matches!(
        harness.try_event(),
        Some(SyncEvent::Synchronized { count: 10 })
    ));
}
