//! Events emitted by the synchronizer.
//!
//! Delivered over an mpsc channel rather than a broadcast bus: a single
//! consumer reads them in emission order and nothing is lost to a
//! late subscriber.

use tokio::sync::mpsc;

use crate::error::SyncError;

/// Notifications surfaced to the service embedding the synchronizer.
#[derive(Debug)]
pub enum SyncEvent {
    /// A fetch cycle completed; `count` headers were scheduled (0 when
    /// the chain was already caught up or no origin qualified).
    Synchronized {
        /// Number of headers requested in this cycle.
        count: u64,
    },
    /// Message handling failed; the cause is carried here instead of
    /// being thrown back at the message source.
    Error(SyncError),
}

/// Build the event channel the synchronizer sends on.
pub fn event_channel() -> (
    mpsc::UnboundedSender<SyncEvent>,
    mpsc::UnboundedReceiver<SyncEvent>,
) {
    mpsc::unbounded_channel()
}
