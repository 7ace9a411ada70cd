//! Run statistics collection and reporting.
//!
//! Tracks how many transactions each pipeline stage has handled, the
//! scoreboard's verdicts, and the final report the coordinator produces when
//! the run budget expires.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::common::data::BugKey;
use crate::coverage::CoverageReport;

#[derive(Debug, Default)]
struct Counters {
    generated: AtomicU64,
    driven: AtomicU64,
    observed: AtomicU64,
    scored: AtomicU64,
    passed: AtomicU64,
    failed: AtomicU64,
}

/// Per-stage counters shared by the pipeline.
///
/// Each counter has exactly one writer: the stage it is named after.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    counters: Arc<Counters>,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_generated(&self) {
        self.counters.generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_driven(&self) {
        self.counters.driven.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_observed(&self) {
        self.counters.observed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one scoreboard comparison and its outcome.
    pub fn record_verdict(&self, passed: bool) {
        self.counters.scored.fetch_add(1, Ordering::Relaxed);
        if passed {
            self.counters.passed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StageCounts {
        let c = &self.counters;
        StageCounts {
            generated: c.generated.load(Ordering::Relaxed),
            driven: c.driven.load(Ordering::Relaxed),
            observed: c.observed.load(Ordering::Relaxed),
            scored: c.scored.load(Ordering::Relaxed),
            passed: c.passed.load(Ordering::Relaxed),
            failed: c.failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`PipelineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub generated: u64,
    pub driven: u64,
    pub observed: u64,
    pub scored: u64,
    pub passed: u64,
    pub failed: u64,
}

/// Outcome of one run, assembled by the coordinator.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub device: String,
    pub seed: Option<u64>,
    pub iterations: u64,
    pub run_budget: u64,
    /// Logical time at which the report was taken, in ns.
    pub sim_time: u64,
    pub counts: StageCounts,
    /// Distinct failing input combinations, in `(a, b, op)` order.
    pub unique_bugs: Vec<BugKey>,
    pub coverage: CoverageReport,
    pub coverage_file: Option<String>,
}

impl RunReport {
    pub fn unique_bug_count(&self) -> usize {
        self.unique_bugs.len()
    }

    /// Returns `true` if every requested transaction was generated and checked
    /// before the budget expired.
    pub fn completed(&self) -> bool {
        self.counts.generated == self.iterations && self.counts.scored == self.iterations
    }

    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let c = &self.counts;
        let scored = if c.scored == 0 { 1 } else { c.scored };
        let pass_rate = c.passed as f64 / scored as f64 * 100.0;

        println!("\n==========================================================");
        println!("ALU VERIFICATION SUMMARY");
        println!("==========================================================");
        println!("device                   {}", self.device);
        match self.seed {
            Some(seed) => println!("seed                     {}", seed),
            None => println!("seed                     directed"),
        }
        println!("sim_time                 {} ns", self.sim_time);
        println!("run_budget               {} ns", self.run_budget);
        println!("iterations               {}", self.iterations);
        println!("----------------------------------------------------------");
        println!("PIPELINE");
        println!("  txn.generated          {}", c.generated);
        println!("  txn.driven             {}", c.driven);
        println!("  txn.observed           {}", c.observed);
        println!("  txn.scored             {}", c.scored);
        println!("----------------------------------------------------------");
        println!("CHECKER");
        println!("  chk.pass               {} ({:.2}%)", c.passed, pass_rate);
        println!("  chk.fail               {}", c.failed);
        println!("  bugs.unique            {}", self.unique_bug_count());
        for key in self.unique_bugs.iter().take(16) {
            println!("    a={:<2} b={:<2} op={}", key.a, key.b, key.op);
        }
        if self.unique_bugs.len() > 16 {
            println!("    ... {} more", self.unique_bugs.len() - 16);
        }
        println!("----------------------------------------------------------");
        println!("COVERAGE");
        for point in &self.coverage.points {
            println!(
                "  {:<22} {:>4}/{:<4} ({:.2}%)",
                point.name, point.covered, point.size, point.percent
            );
        }
        println!(
            "  {:<22} {:>4}/{:<4} ({:.2}%)",
            self.coverage.cross.name,
            self.coverage.cross.covered,
            self.coverage.cross.size,
            self.coverage.cross.percent
        );
        if let Some(ref file) = self.coverage_file {
            println!("  exported to            {}", file);
        }
        println!("==========================================================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts_split_into_pass_and_fail() {
        let stats = PipelineStats::new();
        stats.record_generated();
        stats.record_verdict(true);
        stats.record_verdict(false);
        stats.record_verdict(true);

        let counts = stats.snapshot();
        assert_eq!(counts.generated, 1);
        assert_eq!(counts.scored, 3);
        assert_eq!(counts.passed, 2);
        assert_eq!(counts.failed, 1);
    }
}
