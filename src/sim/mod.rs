//! Simulation harness.
//!
//! Hosts a run on a single-threaded runtime whose clock is paused, so every
//! stage delay advances logical time instantly and the stages interleave in a
//! deterministic order.

/// Logical simulation clock.
pub mod clock;

/// Run coordinator.
pub mod env;

pub use clock::SimClock;
pub use env::Environment;

use crate::common::error::{HarnessError, HarnessResult};
use crate::stats::RunReport;

/// Runs `env` to its budget on a fresh paused-clock runtime.
///
/// # Errors
///
/// Returns [`HarnessError::Runtime`] if the runtime cannot be built, or any
/// error the coordinator itself reports (for example a failed coverage
/// export).
pub fn run(env: Environment) -> HarnessResult<RunReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .map_err(HarnessError::Runtime)?;
    runtime.block_on(env.run())
}
