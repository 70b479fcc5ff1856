//! Structured logging for simulation debugging
//!
//! Thin setup layer over `tracing`. Log levels follow the engine's
//! conventions:
//! - TRACE: per-event scheduling and dispatch
//! - DEBUG: admission, queueing, and cancellation decisions
//! - INFO: run start/completion and totals
//! - WARN/ERROR: suspicious conditions and invariant breakage
//!
//! The filter honors `RUST_LOG`, e.g.
//! `RUST_LOG=tellersim_core::scheduler=trace,tellersim_model=debug`.

use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with sensible defaults (INFO and above).
pub fn init_logging() {
    init_logging_with_level("info");
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tellersim_core={level},tellersim_model={level}").into());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Simulation logging initialized at level: {}", level);
}

/// Create a span covering one simulation run.
pub fn run_span(name: &str, seed: u64) -> Span {
    tracing::info_span!("simulation_run", name = name, seed = seed)
}
