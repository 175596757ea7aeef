//! Last-issued-wins bookkeeping for in-flight plan requests.
//!
//! Every request is stamped with a ticket when issued. Only the outcome of
//! the most recently issued ticket may be adopted; anything older resolving
//! late is discarded locally. The remote call itself is never cancelled.

/// Identifies one issued plan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanTicket(u64);

impl PlanTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing tickets.
#[derive(Debug, Default)]
pub struct PlanSequencer {
    last_issued: u64,
}

impl PlanSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued before it.
    pub fn issue(&mut self) -> PlanTicket {
        self.last_issued += 1;
        PlanTicket(self.last_issued)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_latest(&self, ticket: PlanTicket) -> bool {
        ticket.0 == self.last_issued
    }
}
