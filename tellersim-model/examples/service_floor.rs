//! Simulate the reference operating day and print the bucketed report.
//!
//! ```text
//! cargo run --example service_floor
//! RUST_LOG=tellersim_model=debug cargo run --example service_floor
//! ```

use tellersim_core::init_logging;
use tellersim_model::{simulate, SimulationConfig};

fn main() {
    init_logging();

    let config = SimulationConfig::default();
    let seed = 42;
    let report = simulate(config, seed).expect("reference configuration is valid");

    println!("\n=== Service floor, seed {seed} ===");
    println!(
        "{:>11}  {:>8}  {:>6}  {:>9}  {:>9}",
        "bucket", "arrivals", "served", "abandoned", "mean wait"
    );
    for bucket in &report.buckets {
        println!(
            "{:>4}-{:<6}  {:>8}  {:>6}  {:>9}  {:>8.2}m",
            bucket.bucket_start,
            bucket.bucket_end,
            bucket.arrivals,
            bucket.served,
            bucket.abandoned,
            bucket.mean_wait
        );
    }
    println!(
        "\ntotals: {} arrivals, {} served, {} abandoned ({:.1}% abandonment)",
        report.total_arrivals,
        report.total_served,
        report.total_abandoned,
        report.abandonment_rate() * 100.0
    );
}
