//! Per-stage execution context.

use std::fmt;

use log::Level;

use crate::sim::clock::SimClock;
use crate::stats::PipelineStats;

/// Log target for stage hand-off lines.
pub const PIPELINE_TARGET: &str = "alu_testbench::pipeline";

/// What every stage carries: its tag, the logical clock, the shared counters,
/// and whether hand-off lines are promoted from `debug` to `info`.
#[derive(Clone, Debug)]
pub struct StageContext {
    pub name: &'static str,
    pub clock: SimClock,
    pub stats: PipelineStats,
    pub trace: bool,
}

impl StageContext {
    pub fn new(name: &'static str, clock: SimClock, stats: PipelineStats, trace: bool) -> Self {
        Self {
            name,
            clock,
            stats,
            trace,
        }
    }

    /// Suspends this stage for `ns` of logical time.
    pub async fn delay(&self, ns: u64) {
        self.clock.delay(ns).await;
    }

    /// Logs a hand-off line.
    pub fn transfer(&self, args: fmt::Arguments<'_>) {
        let level = if self.trace { Level::Info } else { Level::Debug };
        self.log(level, args);
    }

    /// Logs a line tagged with the logical time and the stage name.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(
            target: PIPELINE_TARGET,
            level,
            "[t={}ns] [{}] {}",
            self.clock.now(),
            self.name,
            args
        );
    }
}
