//! One simulation run: event dispatch and customer bookkeeping
//!
//! [`Simulation`] owns everything one run needs: the scheduler, the customer
//! table, the teller pool, and the statistics collector. Nothing is shared
//! across runs, so batch sweeps can execute runs on separate threads without
//! coordination.
//!
//! The admission-versus-abandonment race is resolved by construction, not by
//! late status checks: a teller is reserved synchronously at decision time,
//! the customer's abandon timer is cancelled in the same step it is pulled
//! from the line, and admission events outrank abandon expiries at equal
//! timestamps. An abandon expiry reaching a non-waiting customer is therefore
//! a hard error, never an expected case.

use crate::arrivals::generate_arrivals;
use crate::config::SimulationConfig;
use crate::customer::{Customer, CustomerId, CustomerStatus};
use crate::error::{ModelError, RunError};
use crate::event::FloorEvent;
use crate::pool::{ServerId, ServerPool};
use crate::report::StatisticsReport;
use crate::stats::StatisticsCollector;
use tellersim_core::dists::{ExponentialDuration, ExponentialInterarrivals};
use tellersim_core::{run_span, Scheduler, SimTime};
use tracing::{debug, info, trace};

// Stream tags xor'd into the run seed so the three samplers draw from
// independent generators.
const ARRIVAL_STREAM: u64 = 0x4152_5249;
const SERVICE_STREAM: u64 = 0x5345_5256;
const PATIENCE_STREAM: u64 = 0x5041_5449;

/// State of one run of the service floor.
pub struct Simulation {
    config: SimulationConfig,
    seed: u64,
    scheduler: Scheduler<FloorEvent>,
    customers: Vec<Customer>,
    pool: ServerPool,
    stats: StatisticsCollector,
    events_processed: u64,
}

impl Simulation {
    /// Validate the configuration, generate the full arrival stream, and
    /// prime the scheduler.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ModelError> {
        config.validate()?;

        let horizon = SimTime::from_minutes(config.horizon_minutes);
        let mut scheduler = Scheduler::default();
        let mut interarrivals =
            ExponentialInterarrivals::new(config.arrival_rate, seed ^ ARRIVAL_STREAM);
        let mut patience = config.patience.sampler(seed ^ PATIENCE_STREAM);
        let mut service = ExponentialDuration::from_mean(
            config.mean_service_time,
            seed ^ SERVICE_STREAM,
        );

        let customers = generate_arrivals(
            &mut interarrivals,
            patience.as_mut(),
            &mut service,
            horizon,
            config.customer_quota,
            &mut scheduler,
        )
        .map_err(RunError::from)?;

        let pool = ServerPool::new(config.servers);
        let stats = StatisticsCollector::new(config.horizon_minutes, config.bucket_width_minutes);

        Ok(Self {
            config,
            seed,
            scheduler,
            customers,
            pool,
            stats,
            events_processed: 0,
        })
    }

    /// Dispatch events until the scheduler is empty, then account for the
    /// run.
    ///
    /// The drain runs past the horizon: arrivals stop there, but customers
    /// already on the floor are served or abandon as usual. After the drain
    /// every customer must be either served or abandoned; anything else is a
    /// [`RunError::Conservation`].
    pub fn run(&mut self) -> Result<StatisticsReport, RunError> {
        let span = run_span("service_floor", self.seed);
        let _guard = span.enter();

        info!(
            customers = self.customers.len(),
            servers = self.config.servers,
            horizon_minutes = self.config.horizon_minutes,
            "run starting"
        );

        while let Some(entry) = self.scheduler.pop() {
            self.events_processed += 1;
            let now = entry.time();
            match entry.into_payload() {
                FloorEvent::Arrival { customer } => self.on_arrival(customer, now)?,
                FloorEvent::ServiceAdmission { customer, server } => {
                    self.on_admission(customer, server, now)
                }
                FloorEvent::ServiceCompletion { customer, server } => {
                    self.on_completion(customer, server, now)?
                }
                FloorEvent::AbandonExpiry { customer } => self.on_abandon(customer, now)?,
            }
        }

        let (arrivals, served, abandoned) = (
            self.stats.total_arrivals(),
            self.stats.total_served(),
            self.stats.total_abandoned(),
        );
        if arrivals != served + abandoned {
            return Err(RunError::Conservation {
                arrivals,
                served,
                abandoned,
            });
        }

        info!(
            events = self.events_processed,
            arrivals, served, abandoned, "run complete"
        );
        Ok(self.stats.report(self.config.horizon_minutes))
    }

    /// A customer walks in. A free teller is reserved on the spot; otherwise
    /// the customer joins the line with an armed abandon timer.
    fn on_arrival(&mut self, id: CustomerId, now: SimTime) -> Result<(), RunError> {
        self.stats.record_arrival(now);
        trace!(customer = %id, time = %now, "arrival");

        if let Some(server) = self.pool.try_reserve(id) {
            self.scheduler
                .schedule_at(now, FloorEvent::ServiceAdmission { customer: id, server })
                .map_err(RunError::from)?;
        } else {
            let deadline = self.customers[id.index()].patience_deadline();
            let handle = self
                .scheduler
                .schedule_at(deadline, FloorEvent::AbandonExpiry { customer: id })
                .map_err(RunError::from)?;
            self.pool.enqueue(id, handle);
            trace!(customer = %id, deadline = %deadline, "queued");
        }
        Ok(())
    }

    /// Service begins on a teller that was reserved when the decision was
    /// made.
    fn on_admission(&mut self, id: CustomerId, server: ServerId, now: SimTime) {
        let customer = &mut self.customers[id.index()];
        debug_assert_eq!(customer.status, CustomerStatus::Waiting);
        customer.status = CustomerStatus::InService;
        customer.service_start = Some(now);
        let completion = now + customer.service;
        trace!(customer = %id, server = %server, start = %now, end = %completion, "service starts");

        // Completion cannot land in the past, so this cannot fail.
        self.scheduler
            .schedule_in(customer.service, FloorEvent::ServiceCompletion {
                customer: id,
                server,
            });
    }

    /// Service ends. The freed teller immediately takes the head of the
    /// line, cancelling that customer's abandon timer in the same step.
    fn on_completion(&mut self, id: CustomerId, server: ServerId, now: SimTime) -> Result<(), RunError> {
        let customer = &mut self.customers[id.index()];
        debug_assert_eq!(customer.status, CustomerStatus::InService);
        customer.status = CustomerStatus::Served;
        let wait = customer
            .wait_minutes()
            .unwrap_or_default();
        self.stats.record_served(now, wait);
        debug!(customer = %id, server = %server, wait_minutes = wait, "served");

        self.pool.release(server);
        if let Some((next, abandon_handle)) = self.pool.pop_waiting() {
            self.scheduler.cancel(abandon_handle).map_err(RunError::from)?;
            self.pool.reserve(server, next);
            self.scheduler
                .schedule_at(now, FloorEvent::ServiceAdmission { customer: next, server })
                .map_err(RunError::from)?;
        }
        Ok(())
    }

    /// A waiting customer's patience ran out before any teller freed up.
    fn on_abandon(&mut self, id: CustomerId, now: SimTime) -> Result<(), RunError> {
        let customer = &mut self.customers[id.index()];
        if customer.status != CustomerStatus::Waiting {
            return Err(RunError::StaleExpiry {
                customer: id,
                status: customer.status,
            });
        }
        customer.status = CustomerStatus::Abandoned;
        self.stats.record_abandoned(now);
        debug!(customer = %id, time = %now, "abandoned");

        let removed = self.pool.remove_waiting(id);
        debug_assert!(removed, "abandoning customer was not in the line");
        Ok(())
    }

    /// The customer table, in arrival order. Terminal statuses only after
    /// [`run`](Self::run) returns.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Build and run one simulation in a single call.
pub fn simulate(config: SimulationConfig, seed: u64) -> Result<StatisticsReport, ModelError> {
    let mut simulation = Simulation::new(config, seed)?;
    simulation.run().map_err(ModelError::from)
}
