//! Request sequencing for periodically refreshed result sets.
//!
//! Each fetch takes a [`RequestTicket`] before it starts. When it resolves,
//! its records are applied only if no newer ticket has been applied in the
//! meantime, so a slow earlier response never overwrites a faster later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tracing::debug;

use crate::models::TrendRecord;

/// Sequence number of one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Default)]
struct Slot {
    applied: u64,
    records: Vec<TrendRecord>,
}

/// The latest applied result set.
#[derive(Debug, Default)]
pub struct LatestResults {
    issued: AtomicU64,
    slot: Mutex<Slot>,
}

impl LatestResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket. Tickets start at 1 and strictly increase.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Replace the current records if `ticket` is newer than the last applied one.
    ///
    /// Returns `false` when the response is stale and was discarded.
    pub fn apply(&self, ticket: RequestTicket, records: Vec<TrendRecord>) -> bool {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if ticket.0 <= slot.applied {
            debug!(
                "Discarding stale response #{} (latest applied #{})",
                ticket.0, slot.applied
            );
            return false;
        }
        slot.applied = ticket.0;
        slot.records = records;
        true
    }

    /// Current records and the sequence number they were applied under (0 if none).
    pub fn snapshot(&self) -> (u64, Vec<TrendRecord>) {
        let slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        (slot.applied, slot.records.clone())
    }

    pub fn latest_applied(&self) -> u64 {
        match self.slot.lock() {
            Ok(guard) => guard.applied,
            Err(poisoned) => poisoned.into_inner().applied,
        }
    }
}
