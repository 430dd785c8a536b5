//! # Lumen Testkit
//!
//! Testing utilities for the Lumen light client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a [`SyncHarness`] wiring a synchronizer to in-memory
//!   ports, plus peer and chain builders
//! - **Generators**: proptest strategies for peer sets
//!
//! ## Fixtures
//!
//! ```rust,no_run
//! use lumen_testkit::{SyncHarness, serving_peer};
//!
//! # async fn example() {
//! let mut harness = SyncHarness::new().await;
//! harness.peers.add(serving_peer(1, 10, 100)).await;
//! let count = harness.sync.fetch(None).await.unwrap();
//! assert_eq!(count, 10);
//! # }
//! ```
//!
//! ## Property testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use lumen_testkit::generators::peer_set;
//!
//! proptest! {
//!     #[test]
//!     fn chooses_heaviest(peers in peer_set(16)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    chain_at, inbound_peer, non_serving_peer, serving_peer, SyncHarness, TEST_POLL_INTERVAL,
};
