//! Driver Stage.
//!
//! Takes transactions from the generator and applies their stimulus to the
//! DUT. After each drive the driver waits for the monitor to confirm it has
//! observed the outputs, so the combinational outputs of one transaction are
//! never overwritten before they are captured.

use log::Level;

use crate::common::data::Transaction;
use crate::common::error::HarnessResult;
use crate::core::pipeline::context::StageContext;
use crate::core::pipeline::latches::MailboxRx;
use crate::core::pipeline::signals::Rendezvous;
use crate::soc::SignalBus;

/// Applies generator stimulus to the DUT inputs, one drive per observation.
pub struct Driver {
    ctx: StageContext,
    delay: u64,
    mailbox: MailboxRx<Transaction>,
    bus: SignalBus,
    received: Rendezvous,
    observed: Rendezvous,
}

impl Driver {
    pub fn new(
        ctx: StageContext,
        delay: u64,
        mailbox: MailboxRx<Transaction>,
        bus: SignalBus,
        received: Rendezvous,
        observed: Rendezvous,
    ) -> Self {
        Self {
            ctx,
            delay,
            mailbox,
            bus,
            received,
            observed,
        }
    }

    /// Runs the driver loop until the generator's mailbox is closed and empty.
    pub async fn run(mut self) -> HarnessResult<()> {
        self.ctx.log(Level::Info, format_args!("Starting ...."));
        loop {
            self.ctx.delay(self.delay).await;

            self.ctx
                .transfer(format_args!("Waiting for item from Generator ...."));
            let Some(item) = self.mailbox.get().await else {
                self.ctx
                    .log(Level::Info, format_args!("stimulus exhausted, stopping"));
                return Ok(());
            };
            self.ctx.transfer(format_args!("{}", item));

            self.bus.drive(&item)?;
            self.ctx.stats.record_driven();
            self.received.signal();
            self.ctx
                .transfer(format_args!("Transferring data to DUT ...."));

            self.observed.wait().await;
        }
    }
}
