//! Random process generators for arrival gaps and activity durations
//!
//! This module provides the trait seams and implementations for the
//! probability distributions driving a simulation run: interarrival gaps and
//! sampled durations (service, patience). Every sampler owns its own seeded
//! generator, so a run reproduces the identical sample stream from the same
//! seed and independent runs never share generator state.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};
use std::time::Duration;

/// Trait for generating interarrival gaps
///
/// Abstracts over the arrival process feeding the simulation (Poisson in the
/// service-floor model).
pub trait InterarrivalProcess {
    /// Gap until the next arrival.
    fn next_gap(&mut self) -> Duration;
}

/// Trait for sampling activity durations from a distribution
///
/// Abstracts over the distributions used for service times and customer
/// patience (exponential, fixed constant).
pub trait DurationSampler {
    /// Sample one duration from the distribution.
    fn sample(&mut self) -> Duration;
}

/// Poisson arrival process: exponentially distributed interarrival gaps.
pub struct ExponentialInterarrivals {
    /// Rate parameter (lambda), arrivals per minute
    rate: f64,
    rng: StdRng,
    exp_dist: Exp<f64>,
}

impl ExponentialInterarrivals {
    /// Create a new Poisson arrival process
    ///
    /// # Arguments
    ///
    /// * `rate` - Average arrivals per minute (lambda parameter)
    /// * `seed` - Seed for the sampler's own generator
    ///
    /// # Panics
    ///
    /// Panics if rate is not positive. Callers validate configuration before
    /// constructing samplers.
    pub fn new(rate: f64, seed: u64) -> Self {
        assert!(rate > 0.0, "Rate must be positive");

        Self {
            rate,
            rng: StdRng::seed_from_u64(seed),
            exp_dist: Exp::new(rate).expect("Rate must be positive"),
        }
    }

    /// Get the rate parameter
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl InterarrivalProcess for ExponentialInterarrivals {
    fn next_gap(&mut self) -> Duration {
        let gap_minutes: f64 = self.exp_dist.sample(&mut self.rng);
        minutes_to_duration(gap_minutes)
    }
}

/// Exponentially distributed durations, parameterized by their mean.
pub struct ExponentialDuration {
    mean_minutes: f64,
    rng: StdRng,
    exp_dist: Exp<f64>,
}

impl ExponentialDuration {
    /// Create an exponential duration sampler with the given mean in minutes.
    ///
    /// # Panics
    ///
    /// Panics if the mean is not positive.
    pub fn from_mean(mean_minutes: f64, seed: u64) -> Self {
        assert!(mean_minutes > 0.0, "Mean must be positive");

        Self {
            mean_minutes,
            rng: StdRng::seed_from_u64(seed),
            exp_dist: Exp::new(1.0 / mean_minutes).expect("Mean must be positive"),
        }
    }

    /// Create an exponential duration sampler from a rate (events per minute).
    pub fn from_rate(rate: f64, seed: u64) -> Self {
        assert!(rate > 0.0, "Rate must be positive");
        Self::from_mean(1.0 / rate, seed)
    }

    /// Mean duration in minutes
    pub fn mean_minutes(&self) -> f64 {
        self.mean_minutes
    }
}

impl DurationSampler for ExponentialDuration {
    fn sample(&mut self) -> Duration {
        let minutes: f64 = self.exp_dist.sample(&mut self.rng);
        minutes_to_duration(minutes)
    }
}

/// Fixed constant duration
///
/// Always returns the same duration. Zero is allowed: a zero patience means a
/// customer that cannot be served on arrival gives up instantly.
#[derive(Debug, Clone)]
pub struct FixedDuration {
    duration: Duration,
}

impl FixedDuration {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn from_minutes(minutes: f64) -> Self {
        assert!(
            minutes >= 0.0 && minutes.is_finite(),
            "Fixed duration must be finite and non-negative"
        );
        Self {
            duration: minutes_to_duration(minutes),
        }
    }
}

impl DurationSampler for FixedDuration {
    fn sample(&mut self) -> Duration {
        self.duration
    }
}

fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::from_secs_f64(minutes * 60.0)
}
