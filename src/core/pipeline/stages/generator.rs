//! Generator Stage.
//!
//! Produces one transaction per iteration, samples its coverage, and hands it
//! to the driver. The generator does not produce the next transaction until
//! the driver has confirmed receipt of the current one, and then waits out
//! its inter-stimulus spacing.

use std::collections::VecDeque;

use log::Level;
use rand::rngs::StdRng;

use crate::common::data::Transaction;
use crate::common::error::HarnessResult;
use crate::core::pipeline::context::StageContext;
use crate::core::pipeline::latches::MailboxTx;
use crate::core::pipeline::signals::Rendezvous;
use crate::coverage::Coverage;

/// Where the generator's stimulus comes from.
#[derive(Debug)]
pub enum Stimulus {
    /// Constrained-random stimulus drawn from a seeded generator.
    Random(StdRng),
    /// A fixed sequence of `(a, b, op)` stimulus, applied in order.
    Directed(VecDeque<Transaction>),
}

impl Stimulus {
    /// Builds a directed sequence from stimulus tuples.
    pub fn directed<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (u8, u8, u8)>,
    {
        Stimulus::Directed(
            items
                .into_iter()
                .map(|(a, b, op)| Transaction::new(a, b, op))
                .collect(),
        )
    }

    /// Fills the stimulus fields of `item`; returns `false` when exhausted.
    fn next_into(&mut self, item: &mut Transaction) -> bool {
        match self {
            Stimulus::Random(rng) => {
                item.randomize(rng);
                true
            }
            Stimulus::Directed(queue) => match queue.pop_front() {
                Some(next) => {
                    item.copy_data(&next);
                    true
                }
                None => false,
            },
        }
    }
}

/// Produces the run's stimulus and samples its coverage.
pub struct Generator {
    ctx: StageContext,
    iterations: u64,
    delay: u64,
    stimulus: Stimulus,
    coverage: Coverage,
    mailbox: MailboxTx<Transaction>,
    received: Rendezvous,
}

impl Generator {
    /// Creates a generator.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Stage context (clock, counters, logging)
    /// * `iterations` - Number of transactions to produce
    /// * `delay` - Spacing between transactions, in logical time units
    /// * `stimulus` - Stimulus source
    /// * `coverage` - Coverage model sampled once per transaction
    /// * `mailbox` - Generator→Driver mailbox
    /// * `received` - Signal set by the driver on receipt
    pub fn new(
        ctx: StageContext,
        iterations: u64,
        delay: u64,
        stimulus: Stimulus,
        coverage: Coverage,
        mailbox: MailboxTx<Transaction>,
        received: Rendezvous,
    ) -> Self {
        Self {
            ctx,
            iterations,
            delay,
            stimulus,
            coverage,
            mailbox,
            received,
        }
    }

    /// Runs the generator loop to completion.
    ///
    /// Dropping the mailbox sender at the end tells the driver that no more
    /// stimulus is coming.
    pub async fn run(mut self) -> HarnessResult<()> {
        let total = self.iterations;
        for i in 0..total {
            let mut item = Transaction::default();
            if !self.stimulus.next_into(&mut item) {
                self.ctx.log(
                    Level::Info,
                    format_args!("directed stimulus exhausted after {} items", i),
                );
                break;
            }
            self.coverage.sample(&item);
            self.ctx.stats.record_generated();
            self.ctx.transfer(format_args!(
                "Loop:{}/{} create next item {}",
                i + 1,
                total,
                item
            ));

            self.mailbox.put(item).await?;
            self.ctx
                .transfer(format_args!("Wait for Driver to receive data"));
            self.received.wait().await;
            self.ctx.delay(self.delay).await;
        }
        self.ctx.log(Level::Info, format_args!("finished"));
        Ok(())
    }
}
