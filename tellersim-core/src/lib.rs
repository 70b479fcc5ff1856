//! Core discrete event simulation engine.
//!
//! This crate provides the fundamental building blocks for the service-floor
//! simulation: time management, a cancellable event scheduler, and seedable
//! random process generators.
//!
//! # Architecture Overview
//!
//! - [`SimTime`]: simulated time (not wall-clock time), nanosecond precision
//!   with minute-oriented helpers for the service-floor model.
//! - [`Scheduler`]: the event clock plus a totally ordered queue of pending
//!   events. Generic over the event payload; the model crate supplies its own
//!   event enum and a dispatch loop.
//! - [`dists`]: interarrival and duration samplers over seeded generators.
//!
//! # Determinism
//!
//! Everything here is deterministic given a seed: the scheduler breaks
//! timestamp ties by `(rank, insertion order)` and the samplers own their
//! seeded `StdRng` instances. Two runs with the same configuration and seed
//! dispatch the identical event sequence.
//!
//! # Basic Usage
//!
//! ```
//! use tellersim_core::{Payload, Scheduler, SimTime};
//!
//! #[derive(Debug)]
//! struct Tick(u32);
//! impl Payload for Tick {}
//!
//! let mut scheduler = Scheduler::default();
//! scheduler.schedule_at(SimTime::from_minutes(1), Tick(1)).unwrap();
//! while let Some(event) = scheduler.pop() {
//!     assert_eq!(event.time(), scheduler.time());
//! }
//! ```

pub mod dists;
pub mod error;
pub mod logging;
pub mod scheduler;
pub mod time;
pub mod types;

pub use dists::{
    DurationSampler, ExponentialDuration, ExponentialInterarrivals, FixedDuration,
    InterarrivalProcess,
};
pub use error::EventError;
pub use logging::{init_logging, init_logging_with_level, run_span};
pub use scheduler::{ClockRef, EventEntry, Payload, Scheduler};
pub use time::SimTime;
pub use types::EventId;
