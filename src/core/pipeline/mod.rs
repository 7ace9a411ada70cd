//! Verification pipeline.
//!
//! This module contains the four pipeline stages (generator, driver, monitor,
//! scoreboard), the mailboxes that move transactions forward between them,
//! and the rendezvous signals that carry completion backward.

/// Per-stage clock, counters and logging.
pub mod context;

/// Bounded hand-off mailboxes (Generator→Driver, Monitor→Scoreboard).
pub mod latches;

/// One-shot rendezvous signals (received, observed, drive strobe).
pub mod signals;

/// Pipeline stage implementations.
pub mod stages;

pub use context::StageContext;
pub use latches::{mailbox, MailboxRx, MailboxTx};
pub use signals::Rendezvous;
