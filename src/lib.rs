//! 4-bit ALU Verification Testbench Library.
//!
//! This crate implements a transaction-level testbench for a combinational
//! 4-bit ALU (add, xor, and, or). Stimulus flows through a four-stage
//! pipeline running on a logical clock, every observed result is checked
//! against a reference model, and distinct failing input combinations are
//! counted as unique bugs.
//!
//! # Architecture
//!
//! * **Pipeline**: Generator, Driver, Monitor and Scoreboard tasks connected
//!   by bounded mailboxes and rendezvous signals.
//! * **Checking**: Reference ALU, per-transaction verdicts and a registry of
//!   unique failing `(a, b, op)` combinations.
//! * **Coverage**: Operand, selector and cross coverage, exported as JSON.
//!
//! # Modules
//!
//! * `common`: Shared types, constants, and error handling.
//! * `config`: Configuration loading and validation.
//! * `core`: Pipeline stages, reference model and bug registry.
//! * `coverage`: Functional coverage model.
//! * `sim`: Logical clock, run coordinator and runtime entry point.
//! * `soc`: Device-under-test interface and behavioral ALU.
//! * `stats`: Pipeline counters and run report.

/// Shared types, constants, and error handling.
///
/// Provides the transaction record, the operation selector, the unique bug
/// key and the harness error type used throughout the testbench.
pub mod common;

/// Configuration system for run, timing, pipeline, coverage and DUT settings.
///
/// Loads and parses TOML configuration files; every value has a default.
pub mod config;

/// Verification core including pipeline stages and the reference model.
pub mod core;

/// Functional coverage of the stimulus space.
pub mod coverage;

/// Simulation harness and run orchestration.
///
/// Hosts a run on a paused-clock runtime and coordinates the pipeline until
/// the run budget expires.
pub mod sim;

/// Device-under-test interface.
///
/// Defines the signal-level boundary between the testbench and the unit
/// under test, plus a behavioral ALU with fault injection.
pub mod soc;

/// Pipeline counters and end-of-run reporting.
pub mod stats;
