//! Stimulus domain and reference-scenario constants.

/// Largest legal operand value (4-bit operands).
pub const OPERAND_MAX: u8 = 0xF;

/// Number of distinct operand values.
pub const OPERAND_VALUES: usize = OPERAND_MAX as usize + 1;

/// Largest legal operation selector.
pub const OP_MAX: u8 = 3;

/// Number of distinct operation selectors.
pub const OP_VALUES: usize = OP_MAX as usize + 1;

/// Modulus of the 4-bit adder.
pub const ADD_MODULUS: u8 = 16;

/// Mask applied to the 4-bit result bus.
pub const RESULT_MASK: u8 = 0xF;

/// Mask applied to the 2-bit selector bus.
pub const OP_MASK: u8 = 0x3;

/// Number of generator iterations in the reference scenario.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Total logical run budget of the reference scenario, in ns.
pub const DEFAULT_RUN_BUDGET: u64 = 5_001_000;

/// Inter-stimulus spacing of the generator, in ns.
pub const GENERATOR_DELAY: u64 = 500;

/// Drive latency of the driver, in ns.
pub const DRIVER_DELAY: u64 = 500;

/// Sampling offset of the monitor, in ns. Must stay below the driver delay.
pub const MONITOR_DELAY: u64 = 499;

/// Consumption offset of the scoreboard, in ns.
pub const SCOREBOARD_DELAY: u64 = 600;

/// Capacity of each hand-off mailbox.
pub const MAILBOX_CAPACITY: usize = 1;

/// File the coverage model is exported to unless configured otherwise.
pub const DEFAULT_COVERAGE_FILE: &str = "alu_coverage.json";
