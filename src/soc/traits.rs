//! Device-Under-Test Trait.
//!
//! This module defines the interface a device model must implement to be
//! driven by the verification pipeline. It allows the signal bus to interact
//! with a behavioral model, a fault-injected model, or a simulator binding
//! uniformly.

use crate::common::error::HarnessResult;
use crate::soc::Signal;

/// Trait for a combinational unit under test.
///
/// Inputs are latched by [`Dut::write`]; outputs are a pure function of the
/// latched inputs and are visible to [`Dut::read`] immediately.
pub trait Dut: Send {
    /// Returns the user-friendly name of the device.
    ///
    /// Used for logging purposes.
    fn name(&self) -> &str;

    /// Drives a value onto an input signal.
    ///
    /// # Errors
    ///
    /// Returns [`crate::common::HarnessError::ReadOnlySignal`] when `signal`
    /// is one of the outputs.
    fn write(&mut self, signal: Signal, value: u8) -> HarnessResult<()>;

    /// Reads the current value of any signal.
    fn read(&self, signal: Signal) -> u8;
}
