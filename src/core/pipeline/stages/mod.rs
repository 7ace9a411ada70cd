//! Pipeline stage implementations.
//!
//! Contains the four stages of the verification pipeline:
//! - Generator: Produces randomized stimulus and samples coverage
//! - Driver: Applies stimulus to the DUT inputs
//! - Monitor: Captures the DUT signals after each drive
//! - Scoreboard: Checks captured outputs against the reference model
//!
//! Every stage runs as its own task and suspends at least once per
//! iteration: on its fixed delay, on a mailbox, or on a rendezvous.

/// Stimulus driver implementation.
pub mod driver;

/// Stimulus generator implementation.
pub mod generator;

/// DUT monitor implementation.
pub mod monitor;

/// Checker and bug deduplication implementation.
pub mod scoreboard;

pub use driver::Driver;
pub use generator::{Generator, Stimulus};
pub use monitor::Monitor;
pub use scoreboard::{Scoreboard, Verdict};
