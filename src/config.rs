use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::common::constants::{
    DEFAULT_COVERAGE_FILE, DEFAULT_ITERATIONS, DEFAULT_RUN_BUDGET, DRIVER_DELAY, GENERATOR_DELAY,
    MAILBOX_CAPACITY, MONITOR_DELAY, OPERAND_MAX, OP_MAX, RESULT_MASK, SCOREBOARD_DELAY,
};
use crate::common::error::{HarnessError, HarnessResult};
use crate::soc::alu::Fault;

/// Top-level harness configuration.
///
/// Every section and field has a default, so an empty file (or
/// `Config::default()`) describes the reference scenario.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub dut: DutConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Seed for the stimulus generator; drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_iterations")]
    pub iterations: u64,

    /// Logical time the coordinator waits before reporting, in ns.
    #[serde(default = "default_run_budget")]
    pub run_budget: u64,

    #[serde(default)]
    pub trace_transactions: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: None,
            iterations: default_iterations(),
            run_budget: default_run_budget(),
            trace_transactions: false,
            log_level: default_log_level(),
        }
    }
}

impl GeneralConfig {
    pub fn log_level_val(&self) -> HarnessResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            HarnessError::InvalidConfig(format!("unknown log level '{}'", self.log_level))
        })
    }
}

/// Per-stage delay quanta, in ns.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_generator_delay")]
    pub generator: u64,

    #[serde(default = "default_driver_delay")]
    pub driver: u64,

    #[serde(default = "default_monitor_delay")]
    pub monitor: u64,

    #[serde(default = "default_scoreboard_delay")]
    pub scoreboard: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            generator: default_generator_delay(),
            driver: default_driver_delay(),
            monitor: default_monitor_delay(),
            scoreboard: default_scoreboard_delay(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_mailbox_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageConfig {
    /// Destination of the JSON coverage report. `None` skips the export.
    #[serde(default = "default_export_path")]
    pub export_path: Option<String>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DutConfig {
    /// Faults injected into the behavioral ALU model.
    #[serde(default)]
    pub faults: Vec<Fault>,
}

impl Config {
    /// Reads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HarnessResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| HarnessError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> HarnessResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Checks the invariants the pipeline relies on.
    ///
    /// The monitor quantum must be strictly below the driver quantum so the
    /// monitor is armed on the drive strobe before the driver's next commit.
    pub fn validate(&self) -> HarnessResult<()> {
        let invalid = |msg: String| Err(HarnessError::InvalidConfig(msg));

        if self.general.iterations == 0 {
            return invalid("general.iterations must be at least 1".into());
        }
        if self.general.run_budget == 0 {
            return invalid("general.run_budget must be at least 1".into());
        }
        self.general.log_level_val()?;
        if self.pipeline.mailbox_capacity == 0 {
            return invalid("pipeline.mailbox_capacity must be at least 1".into());
        }
        if self.timing.monitor >= self.timing.driver {
            return invalid(format!(
                "timing.monitor ({}) must be below timing.driver ({})",
                self.timing.monitor, self.timing.driver
            ));
        }
        for fault in &self.dut.faults {
            if fault.a > OPERAND_MAX || fault.b > OPERAND_MAX || fault.op > OP_MAX {
                return invalid(format!("fault {} is outside the stimulus domain", fault));
            }
            let out_too_wide = fault.out.is_some_and(|out| out > RESULT_MASK);
            let carry_too_wide = fault.c.is_some_and(|c| c > 1);
            if out_too_wide || carry_too_wide {
                return invalid(format!("fault {} drives an output outside its width", fault));
            }
        }
        Ok(())
    }
}

fn default_iterations() -> u64 {
    DEFAULT_ITERATIONS
}

fn default_run_budget() -> u64 {
    DEFAULT_RUN_BUDGET
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_generator_delay() -> u64 {
    GENERATOR_DELAY
}

fn default_driver_delay() -> u64 {
    DRIVER_DELAY
}

fn default_monitor_delay() -> u64 {
    MONITOR_DELAY
}

fn default_scoreboard_delay() -> u64 {
    SCOREBOARD_DELAY
}

fn default_mailbox_capacity() -> usize {
    MAILBOX_CAPACITY
}

fn default_export_path() -> Option<String> {
    Some(DEFAULT_COVERAGE_FILE.to_string())
}
