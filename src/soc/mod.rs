//! Device-under-test interface.
//!
//! The harness treats the unit under test as a black box exposing named
//! signals. This module defines those signals, the trait a device model
//! implements, the shared signal bus the driver and monitor use, and a
//! behavioral 4-bit ALU model with fault injection.

/// Behavioral ALU model and fault injection.
pub mod alu;

/// Shared signal bus and drive strobe.
pub mod interconnect;

/// Device interface trait.
pub mod traits;

use std::fmt;

pub use alu::{AluModel, Fault};
pub use interconnect::SignalBus;
pub use traits::Dut;

/// A named signal on the DUT boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    A,
    B,
    Op,
    C,
    Out,
}

impl Signal {
    pub fn name(self) -> &'static str {
        match self {
            Signal::A => "a",
            Signal::B => "b",
            Signal::Op => "op",
            Signal::C => "c",
            Signal::Out => "out",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

