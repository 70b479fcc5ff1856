//! Batch sweeps over seeds
//!
//! Runs are fully independent (each owns its scheduler, samplers, and
//! tallies), so a batch fans out over scoped threads with no shared state and
//! no coordination beyond the join. Results come back in seed order
//! regardless of completion order.

use crate::config::SimulationConfig;
use crate::error::ModelError;
use crate::report::StatisticsReport;
use crate::run::simulate;
use tracing::info;

/// Run one simulation per seed, in parallel, against the same configuration.
///
/// The configuration is validated once up front so a bad value fails before
/// any thread is spawned. Output order matches `seeds` order.
pub fn run_batch(
    config: &SimulationConfig,
    seeds: &[u64],
) -> Result<Vec<StatisticsReport>, ModelError> {
    config.validate()?;
    info!(runs = seeds.len(), "batch starting");

    let mut results = Vec::with_capacity(seeds.len());
    std::thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|&seed| {
                let config = config.clone();
                scope.spawn(move || simulate(config, seed))
            })
            .collect();
        for handle in handles {
            // A run thread only panics if the run itself panicked; propagate.
            results.push(handle.join().expect("simulation thread panicked"));
        }
    });
    results.into_iter().collect()
}
