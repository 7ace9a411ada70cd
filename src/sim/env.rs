//! Verification Environment.
//!
//! This module defines the coordinator of a run. It allocates the two
//! mailboxes, the two rendezvous signals, the bug registry and the coverage
//! model, wires them into the four stages, starts every stage as its own task
//! and then sleeps for the run budget. When the budget expires it exports
//! coverage and reports the unique bug count.
//!
//! The coordinator never stops the stages. They are dropped along with the
//! runtime that hosts the run.

use std::future::Future;

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::common::data::Transaction;
use crate::common::error::HarnessResult;
use crate::config::Config;
use crate::core::pipeline::context::StageContext;
use crate::core::pipeline::latches::mailbox;
use crate::core::pipeline::signals::Rendezvous;
use crate::core::pipeline::stages::{Driver, Generator, Monitor, Scoreboard, Stimulus};
use crate::core::registry::BugRegistry;
use crate::coverage::Coverage;
use crate::sim::clock::SimClock;
use crate::soc::SignalBus;
use crate::stats::{PipelineStats, RunReport};

/// Coordinator of one verification run.
pub struct Environment {
    config: Config,
    bus: SignalBus,
    stimulus: Stimulus,
    seed: Option<u64>,
    iterations: u64,
    tap: Option<UnboundedSender<Transaction>>,
}

impl Environment {
    /// Creates an environment driving constrained-random stimulus.
    ///
    /// Uses `general.seed` when set and a fresh random seed otherwise; the
    /// seed in effect is logged and reported so the run can be replayed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::HarnessError::InvalidConfig`] if the
    /// configuration fails validation.
    pub fn new(config: Config, bus: SignalBus) -> HarnessResult<Self> {
        config.validate()?;
        let seed = config.general.seed.unwrap_or_else(rand::random);
        let iterations = config.general.iterations;
        Ok(Self {
            config,
            bus,
            stimulus: Stimulus::Random(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
            iterations,
            tap: None,
        })
    }

    /// Creates an environment that applies a fixed stimulus sequence.
    ///
    /// The number of iterations is the length of `items`; `general.iterations`
    /// and `general.seed` are ignored.
    pub fn directed<I>(config: Config, bus: SignalBus, items: I) -> HarnessResult<Self>
    where
        I: IntoIterator<Item = (u8, u8, u8)>,
    {
        config.validate()?;
        let stimulus = Stimulus::directed(items);
        let iterations = match &stimulus {
            Stimulus::Directed(queue) => queue.len() as u64,
            Stimulus::Random(_) => 0,
        };
        Ok(Self {
            config,
            bus,
            stimulus,
            seed: None,
            iterations,
            tap: None,
        })
    }

    /// Seed of the random stimulus, `None` for directed runs.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns a receiver yielding every transaction the scoreboard checks,
    /// in the order it checks them.
    pub fn subscribe(&mut self) -> UnboundedReceiver<Transaction> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.tap = Some(tx);
        rx
    }

    /// Runs the pipeline for the configured budget and reports the outcome.
    ///
    /// Must be awaited on a runtime with a paused clock (see
    /// [`crate::sim::run`]), otherwise the budget is waited out in wall time.
    pub async fn run(self) -> HarnessResult<RunReport> {
        let clock = SimClock::start();
        let stats = PipelineStats::new();
        let coverage = Coverage::new();
        let registry = BugRegistry::new();
        let bugs = registry.view();

        let capacity = self.config.pipeline.mailbox_capacity;
        let (gen_tx, gen_rx) = mailbox("gen_drv", capacity);
        let (mon_tx, mon_rx) = mailbox("mon_scb", capacity);
        let received = Rendezvous::new();
        let observed = Rendezvous::new();

        let trace = self.config.general.trace_transactions;
        let timing = &self.config.timing;
        let ctx = |name| StageContext::new(name, clock, stats.clone(), trace);

        let driver = Driver::new(
            ctx("Driver"),
            timing.driver,
            gen_rx,
            self.bus.clone(),
            received.clone(),
            observed.clone(),
        );
        let monitor = Monitor::new(
            ctx("Monitor"),
            timing.monitor,
            self.bus.clone(),
            mon_tx,
            observed,
        );
        let generator = Generator::new(
            ctx("Generator"),
            self.iterations,
            timing.generator,
            self.stimulus,
            coverage.clone(),
            gen_tx,
            received,
        );
        let mut scoreboard = Scoreboard::new(ctx("Scoreboard"), timing.scoreboard, mon_rx, registry);
        if let Some(tap) = self.tap {
            scoreboard = scoreboard.with_tap(tap);
        }

        let device = self.bus.device_name();
        match self.seed {
            Some(seed) => info!(
                "[Environment] device={} seed={} iterations={} budget={}ns",
                device, seed, self.iterations, self.config.general.run_budget
            ),
            None => info!(
                "[Environment] device={} directed iterations={} budget={}ns",
                device, self.iterations, self.config.general.run_budget
            ),
        }

        spawn_stage("Driver", driver.run());
        spawn_stage("Monitor", monitor.run());
        spawn_stage("Generator", generator.run());
        spawn_stage("Scoreboard", scoreboard.run());

        clock.delay(self.config.general.run_budget).await;
        let sim_time = clock.now();

        let coverage_report = match &self.config.coverage.export_path {
            Some(path) => {
                let report = coverage.export(path)?;
                info!("[Environment] coverage exported to {}", path);
                report
            }
            None => coverage.report(),
        };

        let counts = stats.snapshot();
        info!("[Environment] Number of unique bugs = {}", bugs.len());
        if counts.scored < self.iterations {
            warn!(
                "[Environment] run budget of {}ns expired with {}/{} transactions checked",
                self.config.general.run_budget, counts.scored, self.iterations
            );
        }

        Ok(RunReport {
            device,
            seed: self.seed,
            iterations: self.iterations,
            run_budget: self.config.general.run_budget,
            sim_time,
            counts,
            unique_bugs: bugs.keys(),
            coverage: coverage_report,
            coverage_file: self.config.coverage.export_path.clone(),
        })
    }
}

/// Starts a stage as an independent task.
///
/// The handle is dropped; a stage that ends with an error logs it and the
/// run continues to its budget.
fn spawn_stage<F>(name: &'static str, stage: F)
where
    F: Future<Output = HarnessResult<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = stage.await {
            error!("[{}] stopped: {}", name, err);
        }
    });
}
