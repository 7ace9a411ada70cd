//! Scoreboard Stage.
//!
//! This module implements the checker at the end of the pipeline. It is
//! responsible for:
//! - Taking each capture from the monitor in order.
//! - Snapshotting it into a private reference transaction.
//! - Predicting the result with the reference ALU.
//! - Comparing prediction and observation, logging PASS or FAIL.
//! - Recording each failing input combination once in the bug registry.
//!
//! A mismatch is a finding, not a fault: it is never returned as an error
//! and the pipeline keeps running.

use log::Level;
use tokio::sync::mpsc::UnboundedSender;

use crate::common::data::{AluOp, Transaction};
use crate::common::error::HarnessResult;
use crate::core::pipeline::context::StageContext;
use crate::core::pipeline::latches::MailboxRx;
use crate::core::registry::BugRegistry;
use crate::core::units::alu::{Expected, ReferenceAlu};

/// Outcome of checking one transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Observed result and carry equal the prediction.
    Pass(Expected),
    /// Observation diverged from the prediction.
    ///
    /// `expected` is `None` when the observed selector is outside `0..=3` and
    /// no prediction exists. `new_bug` is `true` the first time this input
    /// combination fails.
    Mismatch {
        expected: Option<Expected>,
        new_bug: bool,
    },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass(_))
    }
}

/// Checks observed transactions against the reference ALU and records unique bugs.
pub struct Scoreboard {
    ctx: StageContext,
    delay: u64,
    mailbox: MailboxRx<Transaction>,
    registry: BugRegistry,
    reference: Transaction,
    tap: Option<UnboundedSender<Transaction>>,
}

impl Scoreboard {
    pub fn new(
        ctx: StageContext,
        delay: u64,
        mailbox: MailboxRx<Transaction>,
        registry: BugRegistry,
    ) -> Self {
        Self {
            ctx,
            delay,
            mailbox,
            registry,
            reference: Transaction::default(),
            tap: None,
        }
    }

    /// Forwards every checked transaction to `tap`, in checking order.
    pub fn with_tap(mut self, tap: UnboundedSender<Transaction>) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn registry(&self) -> &BugRegistry {
        &self.registry
    }

    /// Runs the scoreboard loop until the monitor's mailbox is closed.
    pub async fn run(mut self) -> HarnessResult<()> {
        loop {
            self.ctx.delay(self.delay).await;

            let Some(item) = self.mailbox.get().await else {
                return Ok(());
            };
            self.ctx
                .transfer(format_args!("Waiting for item from Monitor ...."));
            self.ctx.transfer(format_args!("{}", item));

            self.check(&item);
            if let Some(tap) = &self.tap {
                // A dropped receiver only means nobody is listening any more.
                let _ = tap.send(item);
            }
        }
    }

    /// Checks one observed transaction against the reference model.
    ///
    /// The comparison runs on a private copy of `item`, never on the consumed
    /// instance itself.
    pub fn check(&mut self, item: &Transaction) -> Verdict {
        self.reference.copy_data(item);
        let observed = self.reference;

        let verdict = match AluOp::try_from(observed.op) {
            Ok(op) => {
                let expected = ReferenceAlu::execute(op, observed.a, observed.b);
                if expected.out == observed.out && expected.carry == observed.c {
                    self.ctx.log(
                        Level::Info,
                        format_args!(
                            "Scoreboard Pass! {} match, ref_output = {:#b}, alu_out = {:#b}, ref_carry = {}, alu_carry = {}",
                            match_label(op),
                            expected.out,
                            observed.out,
                            expected.carry,
                            observed.c
                        ),
                    );
                    Verdict::Pass(expected)
                } else {
                    let new_bug = self.registry.record(observed.key());
                    self.ctx.log(
                        Level::Warn,
                        format_args!(
                            "Scoreboard Error! {} mismatch, a = {} b = {} op = {}, ref_output = {:#b}, alu_out = {:#b}, ref_carry = {}, alu_carry = {}{}",
                            match_label(op),
                            observed.a,
                            observed.b,
                            observed.op,
                            expected.out,
                            observed.out,
                            expected.carry,
                            observed.c,
                            if new_bug { " [new unique bug]" } else { "" }
                        ),
                    );
                    Verdict::Mismatch {
                        expected: Some(expected),
                        new_bug,
                    }
                }
            }
            Err(err) => {
                let new_bug = self.registry.record(observed.key());
                self.ctx.log(
                    Level::Warn,
                    format_args!(
                        "Scoreboard Error! {} read back from DUT, a = {} b = {}, alu_out = {:#b}, alu_carry = {}{}",
                        err,
                        observed.a,
                        observed.b,
                        observed.out,
                        observed.c,
                        if new_bug { " [new unique bug]" } else { "" }
                    ),
                );
                Verdict::Mismatch {
                    expected: None,
                    new_bug,
                }
            }
        };

        self.ctx.stats.record_verdict(verdict.is_pass());
        verdict
    }
}

fn match_label(op: AluOp) -> &'static str {
    match op {
        AluOp::Add => "Carry and Sum",
        other => other.mnemonic(),
    }
}
