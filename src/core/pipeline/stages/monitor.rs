//! Monitor Stage.
//!
//! Samples every DUT signal once per drive and forwards the capture to the
//! scoreboard. The operands and selector are re-read from the DUT rather than
//! taken from the driver, so what is checked is what the device actually saw.

use log::Level;

use crate::common::data::Transaction;
use crate::common::error::HarnessResult;
use crate::core::pipeline::context::StageContext;
use crate::core::pipeline::latches::MailboxTx;
use crate::core::pipeline::signals::Rendezvous;
use crate::soc::SignalBus;

/// Captures every DUT signal after each drive and forwards it to the scoreboard.
pub struct Monitor {
    ctx: StageContext,
    delay: u64,
    bus: SignalBus,
    mailbox: MailboxTx<Transaction>,
    observed: Rendezvous,
}

impl Monitor {
    pub fn new(
        ctx: StageContext,
        delay: u64,
        bus: SignalBus,
        mailbox: MailboxTx<Transaction>,
        observed: Rendezvous,
    ) -> Self {
        Self {
            ctx,
            delay,
            bus,
            mailbox,
            observed,
        }
    }

    /// Runs the monitor loop.
    ///
    /// Each iteration waits out the sampling offset, arms on the drive strobe,
    /// captures, hands off (suspending while the scoreboard still holds the
    /// previous capture) and only then releases the driver.
    pub async fn run(self) -> HarnessResult<()> {
        self.ctx.log(Level::Info, format_args!("Starting ...."));
        loop {
            self.ctx.delay(self.delay).await;

            self.ctx
                .transfer(format_args!("Waiting for item from DUT ...."));
            self.bus.driven().await;
            let item = self.bus.sample();
            self.ctx.stats.record_observed();
            self.ctx.transfer(format_args!("{}", item));

            self.mailbox.put(item).await?;
            self.observed.signal();
        }
    }
}
