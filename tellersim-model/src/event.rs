//! Event vocabulary of the service floor

use crate::customer::CustomerId;
use crate::pool::ServerId;
use tellersim_core::Payload;

/// The four event kinds driving a run.
///
/// The rank ordering resolves same-instant races deterministically: an
/// admission (caused by a prior event) always beats an abandon expiry due at
/// the same timestamp, so a customer pulled from the line exactly at its
/// patience deadline is served, not counted twice or lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorEvent {
    /// A customer walks in.
    Arrival { customer: CustomerId },
    /// A reserved teller starts serving the customer.
    ServiceAdmission {
        customer: CustomerId,
        server: ServerId,
    },
    /// A teller finishes serving the customer.
    ServiceCompletion {
        customer: CustomerId,
        server: ServerId,
    },
    /// A waiting customer's patience runs out.
    AbandonExpiry { customer: CustomerId },
}

impl Payload for FloorEvent {
    fn rank(&self) -> u8 {
        match self {
            FloorEvent::ServiceAdmission { .. } => 0,
            FloorEvent::ServiceCompletion { .. } => 1,
            FloorEvent::Arrival { .. } => 2,
            FloorEvent::AbandonExpiry { .. } => 3,
        }
    }
}
