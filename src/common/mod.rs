//! Common types used throughout the verification pipeline.
//!
//! This module provides the transaction record that flows between stages,
//! the operation selector, the bug key used for deduplication, the
//! harness error type, and the constants that define the stimulus domain.

/// Stimulus domain and reference-scenario constants.
pub mod constants;

/// Transaction, operation selector and bug key definitions.
pub mod data;

/// Harness error type.
pub mod error;

pub use data::{AluOp, BugKey, Transaction};
pub use error::{HarnessError, HarnessResult};
