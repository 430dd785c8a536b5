//! Header sync tasks.

use serde::{Deserialize, Serialize};

/// An inclusive range of header numbers to download.
///
/// Invariant: `first <= last`. An empty or backwards range is not a
/// task; [`SyncTask::new`] refuses to build one, so a `SyncTask` that
/// exists is always submittable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncTask {
    first: u64,
    last: u64,
}

impl SyncTask {
    /// Create a task covering `first..=last`.
    ///
    /// Returns `None` if `first > last`.
    pub fn new(first: u64, last: u64) -> Option<Self> {
        if first > last {
            return None;
        }
        Some(Self { first, last })
    }

    /// First header number in the range.
    pub fn first(&self) -> u64 {
        self.first
    }

    /// Last header number in the range.
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Number of headers the task covers.
    pub fn count(&self) -> u64 {
        self.last - self.first + 1
    }

    /// Whether a header number falls inside the range.
    pub fn contains(&self, number: u64) -> bool {
        self.first <= number && number <= self.last
    }
}
