//! Serializable run output

use serde::{Deserialize, Serialize};

/// Counts and mean wait for one slice of the operating day.
///
/// Arrivals are bucketed by arrival time; served and abandoned counts (and
/// the waits behind `mean_wait`) are bucketed by the time the outcome was
/// decided. Outcomes decided after the horizon, during the drain, land in the
/// final bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRecord {
    /// Inclusive start of the bucket, minutes from open
    pub bucket_start: u64,
    /// Exclusive end of the bucket, minutes from open
    pub bucket_end: u64,
    pub arrivals: u64,
    pub served: u64,
    pub abandoned: u64,
    /// Mean queueing wait of customers served in this bucket, in minutes,
    /// rounded to two decimals. Zero when no customer was served.
    pub mean_wait: f64,
}

/// Full output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    /// Buckets in order, covering `[0, horizon)` back to back
    pub buckets: Vec<BucketRecord>,
    pub total_arrivals: u64,
    pub total_served: u64,
    pub total_abandoned: u64,
}

impl StatisticsReport {
    /// Fraction of customers that abandoned, in `[0, 1]`. Zero for an empty
    /// run.
    pub fn abandonment_rate(&self) -> f64 {
        if self.total_arrivals == 0 {
            0.0
        } else {
            self.total_abandoned as f64 / self.total_arrivals as f64
        }
    }
}
