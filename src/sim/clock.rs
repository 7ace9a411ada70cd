//! Logical simulation clock.
//!
//! The harness runs on a single-threaded tokio runtime whose clock is paused.
//! Delays are timers on that clock, and whenever every task is suspended the
//! runtime jumps straight to the next timer, so time here is logical and a
//! delay costs nothing in wall time.
//!
//! The tokio timer wheel has millisecond resolution, so one logical time unit
//! (reported as `ns`, the timescale of the reference testbench) is carried as
//! one millisecond of paused tokio time.

use std::time::Duration;

use tokio::time::Instant;

/// Reads logical time relative to the start of a run.
#[derive(Clone, Copy, Debug)]
pub struct SimClock {
    epoch: Instant,
}

impl SimClock {
    /// Starts a clock at logical time zero.
    ///
    /// Must be called from within the simulation runtime.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Logical time elapsed since [`SimClock::start`].
    pub fn now(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Suspends the calling task for `units` of logical time.
    pub async fn delay(&self, units: u64) {
        tokio::time::sleep(Duration::from_millis(units)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delay_advances_logical_time_exactly() {
        let clock = SimClock::start();
        clock.delay(500).await;
        assert_eq!(clock.now(), 500);
        clock.delay(499).await;
        assert_eq!(clock.now(), 999);
    }
}
