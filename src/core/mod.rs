//! Verification core.
//!
//! The pipeline stages and their synchronization primitives, the reference
//! model the scoreboard checks against, and the registry of unique bugs.

/// Pipeline stages, mailboxes and rendezvous signals.
pub mod pipeline;

/// Unique bug registry.
pub mod registry;

/// Reference functional units.
pub mod units;

pub use registry::{BugRegistry, RegistryView};
