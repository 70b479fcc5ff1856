//! Time-bucketed statistics collection
//!
//! The collector partitions the operating horizon into fixed-width buckets
//! and counts arrivals, completions, and abandonments as they are reported.
//! It never inspects simulation state: the run calls it at the moment each
//! outcome is decided, so bucket sums equal run totals by construction.

use crate::report::{BucketRecord, StatisticsReport};
use tellersim_core::SimTime;

/// Running tallies for one bucket.
#[derive(Debug, Clone, Default)]
struct Bucket {
    arrivals: u64,
    served: u64,
    abandoned: u64,
    wait_sum_minutes: f64,
}

/// Accumulates per-bucket counts over one run.
pub struct StatisticsCollector {
    bucket_width_minutes: u64,
    buckets: Vec<Bucket>,
    total_arrivals: u64,
    total_served: u64,
    total_abandoned: u64,
}

impl StatisticsCollector {
    /// Partition `[0, horizon)` into `ceil(horizon / width)` buckets. The
    /// last bucket is short when the width does not divide the horizon.
    pub fn new(horizon_minutes: u64, bucket_width_minutes: u64) -> Self {
        assert!(horizon_minutes > 0 && bucket_width_minutes > 0);
        let count = horizon_minutes.div_ceil(bucket_width_minutes) as usize;
        Self {
            bucket_width_minutes,
            buckets: vec![Bucket::default(); count],
            total_arrivals: 0,
            total_served: 0,
            total_abandoned: 0,
        }
    }

    /// Bucket holding `time`. Times at or past the horizon (drain outcomes)
    /// clamp to the final bucket so bucket sums always equal totals.
    fn bucket_index(&self, time: SimTime) -> usize {
        let idx = (time.as_minutes() / self.bucket_width_minutes as f64) as usize;
        idx.min(self.buckets.len() - 1)
    }

    pub fn record_arrival(&mut self, time: SimTime) {
        let idx = self.bucket_index(time);
        self.buckets[idx].arrivals += 1;
        self.total_arrivals += 1;
    }

    pub fn record_served(&mut self, time: SimTime, wait_minutes: f64) {
        let idx = self.bucket_index(time);
        let bucket = &mut self.buckets[idx];
        bucket.served += 1;
        bucket.wait_sum_minutes += wait_minutes;
        self.total_served += 1;
    }

    pub fn record_abandoned(&mut self, time: SimTime) {
        let idx = self.bucket_index(time);
        self.buckets[idx].abandoned += 1;
        self.total_abandoned += 1;
    }

    pub fn total_arrivals(&self) -> u64 {
        self.total_arrivals
    }

    pub fn total_served(&self) -> u64 {
        self.total_served
    }

    pub fn total_abandoned(&self) -> u64 {
        self.total_abandoned
    }

    /// Freeze the tallies into a report. Mean waits are rounded to two
    /// decimals; empty buckets report a mean of zero.
    pub fn report(&self, horizon_minutes: u64) -> StatisticsReport {
        let buckets = self
            .buckets
            .iter()
            .enumerate()
            .map(|(i, bucket)| {
                let bucket_start = i as u64 * self.bucket_width_minutes;
                let bucket_end = (bucket_start + self.bucket_width_minutes).min(horizon_minutes);
                let mean_wait = if bucket.served == 0 {
                    0.0
                } else {
                    round2(bucket.wait_sum_minutes / bucket.served as f64)
                };
                BucketRecord {
                    bucket_start,
                    bucket_end,
                    arrivals: bucket.arrivals,
                    served: bucket.served,
                    abandoned: bucket.abandoned,
                    mean_wait,
                }
            })
            .collect();

        StatisticsReport {
            buckets,
            total_arrivals: self.total_arrivals,
            total_served: self.total_served,
            total_abandoned: self.total_abandoned,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
