//! Customer records and their lifecycle
//!
//! A customer is data, not a suspended process: its lifecycle is carried by
//! its status plus the event handles the scheduler holds for it. The
//! transitions are `Waiting -> InService -> Served` or
//! `Waiting -> Abandoned`; both `Served` and `Abandoned` are terminal and a
//! terminal customer is never mutated again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tellersim_core::SimTime;

/// Identifier of a customer within one run, issued in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

impl CustomerId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer({})", self.0)
    }
}

/// Where a customer is in its lifecycle.
///
/// `InService` marks a customer that has been admitted to a teller but whose
/// service has not yet completed; its abandon timer is already cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    Waiting,
    InService,
    Served,
    Abandoned,
}

impl CustomerStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, CustomerStatus::Served | CustomerStatus::Abandoned)
    }
}

/// One customer of the service floor.
///
/// Patience and service duration are drawn once, at creation. Fixing the
/// draws per customer keeps runs reproducible under a seed and lets capacity
/// comparisons reuse the same random stream customer-for-customer.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub arrival_time: SimTime,
    /// How long this customer will wait before walking out
    pub patience: Duration,
    /// How long this customer's service takes once a teller is assigned
    pub service: Duration,
    pub status: CustomerStatus,
    /// Set when a teller is assigned; `None` for customers that abandoned
    pub service_start: Option<SimTime>,
}

impl Customer {
    pub fn new(id: CustomerId, arrival_time: SimTime, patience: Duration, service: Duration) -> Self {
        Self {
            id,
            arrival_time,
            patience,
            service,
            status: CustomerStatus::Waiting,
            service_start: None,
        }
    }

    /// Absolute time at which this customer abandons if still waiting.
    pub fn patience_deadline(&self) -> SimTime {
        self.arrival_time + self.patience
    }

    /// Queueing wait in minutes, excluding the service itself.
    ///
    /// `None` until a teller has been assigned.
    pub fn wait_minutes(&self) -> Option<f64> {
        self.service_start
            .map(|start| start.duration_since(self.arrival_time).as_secs_f64() / 60.0)
    }
}
