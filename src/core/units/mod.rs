//! Functional units used by the checker.

/// Reference ALU model.
pub mod alu;

pub use alu::{Expected, ReferenceAlu};
