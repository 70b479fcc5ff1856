//! Service-floor simulation model.
//!
//! A discrete-event model of a multi-teller service counter: customers arrive
//! as a Poisson stream, wait in a single FIFO line for any free teller, and
//! walk out if their patience runs out first. Each run produces a
//! [`StatisticsReport`] with time-bucketed arrival, service, and abandonment
//! counts plus mean queueing waits.
//!
//! The event engine lives in `tellersim-core`; this crate supplies the
//! domain: the event vocabulary, the teller pool, the customer lifecycle, and
//! the statistics.
//!
//! # Basic Usage
//!
//! ```
//! use tellersim_model::{simulate, SimulationConfig};
//!
//! let report = simulate(SimulationConfig::default(), 42).unwrap();
//! assert_eq!(
//!     report.total_arrivals,
//!     report.total_served + report.total_abandoned
//! );
//! ```
//!
//! Runs are deterministic: the same configuration and seed always produce the
//! same report. [`run_batch`] fans a set of seeds out over threads, one fully
//! independent run per seed.

mod arrivals;
pub mod config;
pub mod customer;
pub mod error;
pub mod event;
pub mod pool;
pub mod report;
pub mod run;
pub mod stats;
pub mod sweep;

pub use config::{Patience, SimulationConfig};
pub use customer::{Customer, CustomerId, CustomerStatus};
pub use error::{ConfigError, ModelError, RunError};
pub use event::FloorEvent;
pub use pool::{ServerId, ServerPool};
pub use report::{BucketRecord, StatisticsReport};
pub use run::{simulate, Simulation};
pub use stats::StatisticsCollector;
pub use sweep::run_batch;
