use std::sync::atomic::{AtomicU64, Ordering};

/// Handle for one issued query; compare against the sequencer before showing its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Last-query-wins bookkeeping for callers that may fire a new lookup before the previous
/// one returns. Only the most recently issued ticket is current.
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: AtomicU64,
}

impl QuerySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `value` only if `ticket` is still the latest query.
    pub fn accept<T>(&self, ticket: QueryTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!("Discarding stale query result — ticket={}", ticket.0);
            None
        }
    }
}
