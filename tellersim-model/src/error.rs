//! Error types for configuration and run failures

use crate::customer::{CustomerId, CustomerStatus};
use tellersim_core::error::EventError;
use thiserror::Error;

/// A configuration value that would make the simulation meaningless.
///
/// Validation rejects, it never clamps.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("arrival rate must be positive and finite, got {0}")]
    ArrivalRate(f64),

    #[error("mean service time must be positive and finite, got {0}")]
    ServiceTime(f64),

    #[error("at least one teller is required")]
    NoServers,

    #[error("fixed patience must be non-negative and finite, got {0} minutes")]
    FixedPatience(f64),

    #[error("abandonment rate must be positive and finite, got {0}")]
    AbandonRate(f64),

    #[error("horizon must be at least one minute, got {0}")]
    Horizon(u64),

    #[error("bucket width must be at least one minute, got {0}")]
    BucketWidth(u64),

    #[error("customer quota, when set, must be at least one")]
    ZeroQuota,
}

/// A failure during event dispatch or in the post-run accounting.
///
/// Any of these means the run's output cannot be trusted; the run aborts
/// instead of reporting.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Event(#[from] EventError),

    /// The books do not balance after the drain: every generated customer
    /// must end up either served or abandoned, exactly once.
    #[error("conservation violated: {arrivals} arrivals != {served} served + {abandoned} abandoned")]
    Conservation {
        arrivals: u64,
        served: u64,
        abandoned: u64,
    },

    /// An abandon expiry fired for a customer that is no longer waiting. The
    /// admission path cancels the timer, so a stale expiry means the
    /// cancellation contract was broken.
    #[error("abandon expiry fired for {customer} in state {status:?}")]
    StaleExpiry {
        customer: CustomerId,
        status: CustomerStatus,
    },
}

/// Top-level error of the one-call entry points.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Run(#[from] RunError),
}
