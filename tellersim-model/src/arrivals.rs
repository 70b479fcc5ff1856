//! Arrival stream generation
//!
//! The full arrival stream is generated before the dispatch loop starts:
//! each customer's arrival time, patience, and service duration are drawn up
//! front, in arrival order, from their own sampler streams. Drawing per
//! customer (rather than on demand at the teller) means a capacity change
//! cannot shift which random values a given customer receives, so runs with
//! more tellers see the same customers sample-path for sample-path.

use crate::customer::{Customer, CustomerId};
use crate::event::FloorEvent;
use tellersim_core::dists::{DurationSampler, InterarrivalProcess};
use tellersim_core::error::EventError;
use tellersim_core::{Scheduler, SimTime};
use tracing::debug;

/// Generate every customer of the run and schedule their arrival events.
///
/// Generation stops at the first arrival that would land at or past the
/// horizon, or once the quota is reached, whichever comes first. Customers
/// are returned in arrival order; `CustomerId(i)` indexes position `i`.
pub(crate) fn generate_arrivals(
    interarrivals: &mut dyn InterarrivalProcess,
    patience: &mut dyn DurationSampler,
    service: &mut dyn DurationSampler,
    horizon: SimTime,
    quota: Option<u64>,
    scheduler: &mut Scheduler<FloorEvent>,
) -> Result<Vec<Customer>, EventError> {
    let mut customers = Vec::new();
    let mut t = SimTime::zero();

    loop {
        if let Some(quota) = quota {
            if customers.len() as u64 >= quota {
                break;
            }
        }
        t = t + interarrivals.next_gap();
        if t >= horizon {
            break;
        }

        let id = CustomerId(customers.len() as u64);
        let customer = Customer::new(id, t, patience.sample(), service.sample());
        scheduler.schedule_at(t, FloorEvent::Arrival { customer: id })?;
        customers.push(customer);
    }

    debug!(count = customers.len(), "generated arrival stream");
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellersim_core::dists::{ExponentialDuration, ExponentialInterarrivals, FixedDuration};

    fn generate(quota: Option<u64>, horizon_minutes: u64, seed: u64) -> Vec<Customer> {
        let mut interarrivals = ExponentialInterarrivals::new(0.25, seed);
        let mut patience = FixedDuration::from_minutes(25.0);
        let mut service = ExponentialDuration::from_mean(10.0, seed ^ 1);
        let mut scheduler = Scheduler::default();
        generate_arrivals(
            &mut interarrivals,
            &mut patience,
            &mut service,
            SimTime::from_minutes(horizon_minutes),
            quota,
            &mut scheduler,
        )
        .unwrap()
    }

    #[test]
    fn test_arrivals_stay_inside_horizon() {
        let customers = generate(None, 480, 42);
        assert!(!customers.is_empty());
        for customer in &customers {
            assert!(customer.arrival_time < SimTime::from_minutes(480));
        }
    }

    #[test]
    fn test_arrival_order_and_ids() {
        let customers = generate(None, 480, 42);
        for (i, customer) in customers.iter().enumerate() {
            assert_eq!(customer.id, CustomerId(i as u64));
            if i > 0 {
                assert!(customer.arrival_time >= customers[i - 1].arrival_time);
            }
        }
    }

    #[test]
    fn test_quota_caps_generation() {
        let customers = generate(Some(10), 1_000_000, 42);
        assert_eq!(customers.len(), 10);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a = generate(None, 480, 7);
        let b = generate(None, 480, 7);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.arrival_time, y.arrival_time);
            assert_eq!(x.patience, y.patience);
            assert_eq!(x.service, y.service);
        }
    }
}
