//! DUT Signal Bus.
//!
//! This module implements the shared handle through which the driver writes
//! the DUT inputs and the monitor samples its outputs. The bus also carries
//! the drive strobe: a one-shot trigger fired each time the driver commits a
//! complete set of inputs, playing the role of a simulator value-change
//! callback.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::common::data::Transaction;
use crate::common::error::HarnessResult;
use crate::core::pipeline::signals::Rendezvous;
use crate::soc::traits::Dut;
use crate::soc::Signal;

/// Shared access to the unit under test.
///
/// Clones refer to the same device. The lock is only held for the duration of
/// a read or write and never across a suspension point.
#[derive(Clone)]
pub struct SignalBus {
    dut: Arc<Mutex<Box<dyn Dut>>>,
    strobe: Rendezvous,
}

impl SignalBus {
    /// Attaches a device to a new bus.
    ///
    /// # Arguments
    ///
    /// * `dut` - The device model to drive and observe
    ///
    /// # Returns
    ///
    /// A bus with no pending drive strobe.
    pub fn new<D: Dut + 'static>(dut: D) -> Self {
        Self {
            dut: Arc::new(Mutex::new(Box::new(dut))),
            strobe: Rendezvous::new(),
        }
    }

    /// Returns the name of the attached device.
    pub fn device_name(&self) -> String {
        self.device().name().to_string()
    }

    /// Reads the current value of one signal.
    pub fn read(&self, signal: Signal) -> u8 {
        self.device().read(signal)
    }

    /// Commits the stimulus of `item` to the DUT inputs and fires the strobe.
    pub fn drive(&self, item: &Transaction) -> HarnessResult<()> {
        {
            let mut dut = self.device();
            dut.write(Signal::A, item.a)?;
            dut.write(Signal::B, item.b)?;
            dut.write(Signal::Op, item.op)?;
        }
        self.strobe.signal();
        Ok(())
    }

    /// Samples every observable signal into a fresh transaction.
    pub fn sample(&self) -> Transaction {
        let dut = self.device();
        Transaction {
            a: dut.read(Signal::A),
            b: dut.read(Signal::B),
            op: dut.read(Signal::Op),
            c: dut.read(Signal::C),
            out: dut.read(Signal::Out),
        }
    }

    /// Suspends until the next committed drive.
    pub async fn driven(&self) {
        self.strobe.wait().await;
    }

    fn device(&self) -> MutexGuard<'_, Box<dyn Dut>> {
        self.dut.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soc::alu::AluModel;

    #[test]
    fn drive_then_sample_pairs_inputs_and_outputs() {
        let bus = SignalBus::new(AluModel::new());
        bus.drive(&Transaction::new(12, 10, 1)).unwrap();
        let seen = bus.sample();
        assert_eq!((seen.a, seen.b, seen.op), (12, 10, 1));
        assert_eq!((seen.out, seen.c), (6, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn drive_fires_strobe() {
        let bus = SignalBus::new(AluModel::new());
        bus.drive(&Transaction::new(1, 2, 0)).unwrap();
        bus.driven().await;
        assert_eq!(bus.read(Signal::Out), 3);
    }
}
