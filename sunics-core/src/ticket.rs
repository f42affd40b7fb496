//! Request tickets for discarding superseded responses.
//!
//! Every search or submission takes a ticket before it goes out. When the
//! response comes back it is only applied if its ticket is still the latest
//! one issued for that operation.

/// Monotonic counter for one kind of request.
#[derive(Debug, Default)]
pub struct RequestCounter {
    latest: u64,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestCounter {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}
