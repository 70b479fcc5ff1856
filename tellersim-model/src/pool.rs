//! Teller pool and FIFO waiting line
//!
//! The pool owns every teller and the strict-FIFO line in front of them. A
//! teller is reserved at the instant the admit decision is made, so two
//! arrivals sharing a timestamp can never double-book the same teller. Each
//! waiting customer carries the handle of its pending abandon-expiry event;
//! handing the handle back on dequeue is what lets the run cancel the timer
//! in the same logical step as the admission.

use crate::customer::CustomerId;
use std::collections::VecDeque;
use std::fmt;
use tellersim_core::EventId;

/// Identifier of a teller within the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerId(pub usize);

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Teller({})", self.0)
    }
}

/// One teller: free, or exclusively occupied by a single customer.
#[derive(Debug, Clone, Copy, Default)]
struct Server {
    occupant: Option<CustomerId>,
}

/// A customer in the line, paired with its pending abandon timer.
#[derive(Debug, Clone, Copy)]
struct WaitingEntry {
    customer: CustomerId,
    abandon_handle: EventId,
}

/// Fixed-capacity pool of identical tellers plus the FIFO wait line.
pub struct ServerPool {
    servers: Vec<Server>,
    line: VecDeque<WaitingEntry>,
}

impl ServerPool {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "pool needs at least one teller");
        Self {
            servers: vec![Server::default(); capacity],
            line: VecDeque::new(),
        }
    }

    /// Reserve a free teller for `customer`, if any is free.
    pub fn try_reserve(&mut self, customer: CustomerId) -> Option<ServerId> {
        let (idx, server) = self
            .servers
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.occupant.is_none())?;
        server.occupant = Some(customer);
        Some(ServerId(idx))
    }

    /// Reserve a specific (known-free) teller for `customer`.
    ///
    /// Used when a completion frees a teller and the line head takes it over.
    pub fn reserve(&mut self, server: ServerId, customer: CustomerId) {
        let slot = &mut self.servers[server.0];
        debug_assert!(slot.occupant.is_none(), "teller {server} is double-booked");
        slot.occupant = Some(customer);
    }

    /// Free a teller, returning the customer it was serving.
    pub fn release(&mut self, server: ServerId) -> Option<CustomerId> {
        self.servers[server.0].occupant.take()
    }

    /// Append a customer to the back of the line.
    pub fn enqueue(&mut self, customer: CustomerId, abandon_handle: EventId) {
        self.line.push_back(WaitingEntry {
            customer,
            abandon_handle,
        });
    }

    /// Pop the earliest-enqueued waiting customer and its abandon handle.
    pub fn pop_waiting(&mut self) -> Option<(CustomerId, EventId)> {
        self.line
            .pop_front()
            .map(|e| (e.customer, e.abandon_handle))
    }

    /// Remove a customer from anywhere in the line (it abandoned).
    ///
    /// Returns `false` if the customer was not in the line, which the run
    /// treats as a broken cancellation contract.
    pub fn remove_waiting(&mut self, customer: CustomerId) -> bool {
        match self.line.iter().position(|e| e.customer == customer) {
            Some(idx) => {
                let _ = self.line.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn line_len(&self) -> usize {
        self.line.len()
    }

    pub fn busy_count(&self) -> usize {
        self.servers.iter().filter(|s| s.occupant.is_some()).count()
    }

    pub fn capacity(&self) -> usize {
        self.servers.len()
    }
}
