//! Simulation configuration and validation
//!
//! The web/dashboard layer parses raw request bodies and hands the core a
//! typed [`SimulationConfig`]. Validation happens here, before any simulation
//! state exists: bad values are rejected with a [`ConfigError`], never
//! clamped.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tellersim_core::dists::{DurationSampler, ExponentialDuration, FixedDuration};

/// How long a waiting customer tolerates the line before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Patience {
    /// Every customer waits at most this many minutes. Zero is valid: a
    /// customer that cannot be served on arrival gives up instantly.
    Fixed { minutes: f64 },
    /// Patience drawn per customer from an exponential distribution with the
    /// given abandonment rate (abandonments per minute of waiting).
    Exponential { rate: f64 },
}

impl Patience {
    /// Build the duration sampler for this patience specification.
    pub fn sampler(&self, seed: u64) -> Box<dyn DurationSampler> {
        match *self {
            Patience::Fixed { minutes } => Box::new(FixedDuration::from_minutes(minutes)),
            Patience::Exponential { rate } => Box::new(ExponentialDuration::from_rate(rate, seed)),
        }
    }
}

/// Parameters of one service-floor run.
///
/// All rates are per minute and all durations are in minutes, matching the
/// operating-day framing of the model (e.g. an 8-hour day is a 480-minute
/// horizon).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Customer arrival rate (customers per minute)
    pub arrival_rate: f64,
    /// Mean service duration (minutes)
    pub mean_service_time: f64,
    /// Number of identical tellers
    pub servers: usize,
    /// Patience specification for waiting customers
    pub patience: Patience,
    /// Operating horizon in minutes; arrivals stop at the horizon, in-flight
    /// work still drains to completion
    pub horizon_minutes: u64,
    /// Statistics bucket width in minutes
    pub bucket_width_minutes: u64,
    /// Optional cap on generated customers. When set, arrival generation
    /// stops at the quota even if the horizon has not been reached.
    pub customer_quota: Option<u64>,
}

impl Default for SimulationConfig {
    /// The reference scenario: 120 customers over an 8-hour day, two tellers,
    /// 10-minute mean service, customers walking out after 25 minutes.
    fn default() -> Self {
        Self {
            arrival_rate: 120.0 / 480.0,
            mean_service_time: 10.0,
            servers: 2,
            patience: Patience::Fixed { minutes: 25.0 },
            horizon_minutes: 480,
            bucket_width_minutes: 30,
            customer_quota: None,
        }
    }
}

impl SimulationConfig {
    /// Check every invariant the simulation relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint. Values are never adjusted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arrival_rate > 0.0 && self.arrival_rate.is_finite()) {
            return Err(ConfigError::ArrivalRate(self.arrival_rate));
        }
        if !(self.mean_service_time > 0.0 && self.mean_service_time.is_finite()) {
            return Err(ConfigError::ServiceTime(self.mean_service_time));
        }
        if self.servers == 0 {
            return Err(ConfigError::NoServers);
        }
        match self.patience {
            Patience::Fixed { minutes } => {
                if !(minutes >= 0.0 && minutes.is_finite()) {
                    return Err(ConfigError::FixedPatience(minutes));
                }
            }
            Patience::Exponential { rate } => {
                if !(rate > 0.0 && rate.is_finite()) {
                    return Err(ConfigError::AbandonRate(rate));
                }
            }
        }
        if self.horizon_minutes == 0 {
            return Err(ConfigError::Horizon(self.horizon_minutes));
        }
        if self.bucket_width_minutes == 0 {
            return Err(ConfigError::BucketWidth(self.bucket_width_minutes));
        }
        if self.customer_quota == Some(0) {
            return Err(ConfigError::ZeroQuota);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        SimulationConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_fixed_patience_is_valid() {
        let config = SimulationConfig {
            patience: Patience::Fixed { minutes: 0.0 },
            ..SimulationConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_rates() {
        let mut config = SimulationConfig {
            arrival_rate: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ArrivalRate(_))
        ));

        config.arrival_rate = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ArrivalRate(_))
        ));

        config.arrival_rate = 0.25;
        config.mean_service_time = -3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ServiceTime(_))
        ));
    }

    #[test]
    fn test_rejects_zero_servers_and_horizon() {
        let config = SimulationConfig {
            servers: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoServers)));

        let config = SimulationConfig {
            horizon_minutes: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Horizon(0))));

        let config = SimulationConfig {
            bucket_width_minutes: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BucketWidth(0))
        ));
    }

    #[test]
    fn test_rejects_bad_patience() {
        let config = SimulationConfig {
            patience: Patience::Fixed { minutes: -1.0 },
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FixedPatience(_))
        ));

        let config = SimulationConfig {
            patience: Patience::Exponential { rate: 0.0 },
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::AbandonRate(_))));
    }

    #[test]
    fn test_rejects_zero_quota() {
        let config = SimulationConfig {
            customer_quota: Some(0),
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroQuota)));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
