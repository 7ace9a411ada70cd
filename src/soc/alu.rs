//! Behavioral 4-bit ALU.
//!
//! This module implements the reference design the pipeline is pointed at by
//! default: two 4-bit operands, a 2-bit selector, a 4-bit result and a carry
//! flag. Faults can be injected for specific input combinations so the
//! scoreboard's bug detection has something to find.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::constants::{OPERAND_MAX, OP_MASK, RESULT_MASK};
use crate::common::error::{HarnessError, HarnessResult};
use crate::soc::traits::Dut;
use crate::soc::Signal;

/// An injected defect.
///
/// When the latched inputs equal `(a, b, op)`, the model reports `out`
/// and/or `c` instead of the correct values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Fault {
    pub a: u8,
    pub b: u8,
    pub op: u8,
    #[serde(default)]
    pub out: Option<u8>,
    #[serde(default)]
    pub c: Option<u8>,
}

impl Fault {
    fn matches(&self, a: u8, b: u8, op: u8) -> bool {
        self.a == a && self.b == b && self.op == op
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.a, self.b, self.op)?;
        if let Some(out) = self.out {
            write!(f, " out={}", out)?;
        }
        if let Some(c) = self.c {
            write!(f, " c={}", c)?;
        }
        Ok(())
    }
}

impl FromStr for Fault {
    type Err = HarnessError;

    /// Parses `a,b,op,out` or `a,b,op,out,c`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HarnessError::InvalidFault(s.to_string());
        let fields = s
            .split(',')
            .map(|f| f.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match fields.as_slice() {
            [a, b, op, out] => Ok(Fault {
                a: *a,
                b: *b,
                op: *op,
                out: Some(*out),
                c: None,
            }),
            [a, b, op, out, c] => Ok(Fault {
                a: *a,
                b: *b,
                op: *op,
                out: Some(*out),
                c: Some(*c),
            }),
            _ => Err(invalid()),
        }
    }
}

/// Behavioral model of the ALU under test.
#[derive(Debug, Default, Clone)]
pub struct AluModel {
    a: u8,
    b: u8,
    op: u8,
    faults: Vec<Fault>,
}

impl AluModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model that misbehaves on the given input combinations.
    pub fn with_faults(faults: Vec<Fault>) -> Self {
        Self {
            faults,
            ..Self::default()
        }
    }

    /// Computes `(out, c)` for the given inputs as the hardware would.
    ///
    /// Addition wraps at 16 and raises the carry when the true sum does not
    /// fit in 4 bits. The bitwise operations never raise the carry.
    pub fn evaluate(a: u8, b: u8, op: u8) -> (u8, u8) {
        let (a, b) = (a & OPERAND_MAX, b & OPERAND_MAX);
        match op & OP_MASK {
            0 => {
                let sum = a + b;
                (sum & RESULT_MASK, sum >> 4)
            }
            1 => (a ^ b, 0),
            2 => (a & b, 0),
            _ => (a | b, 0),
        }
    }

    fn outputs(&self) -> (u8, u8) {
        let (mut out, mut c) = Self::evaluate(self.a, self.b, self.op);
        if let Some(fault) = self
            .faults
            .iter()
            .find(|f| f.matches(self.a, self.b, self.op))
        {
            out = fault.out.unwrap_or(out);
            c = fault.c.unwrap_or(c);
        }
        (out, c)
    }
}

impl Dut for AluModel {
    fn name(&self) -> &str {
        "alu4"
    }

    fn write(&mut self, signal: Signal, value: u8) -> HarnessResult<()> {
        match signal {
            Signal::A => self.a = value & OPERAND_MAX,
            Signal::B => self.b = value & OPERAND_MAX,
            Signal::Op => self.op = value & OP_MASK,
            Signal::C | Signal::Out => return Err(HarnessError::ReadOnlySignal(signal)),
        }
        Ok(())
    }

    fn read(&self, signal: Signal) -> u8 {
        match signal {
            Signal::A => self.a,
            Signal::B => self.b,
            Signal::Op => self.op,
            Signal::C => self.outputs().1,
            Signal::Out => self.outputs().0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_wraps_with_carry() {
        assert_eq!(AluModel::evaluate(5, 3, 0), (8, 0));
        assert_eq!(AluModel::evaluate(9, 7, 0), (0, 1));
        assert_eq!(AluModel::evaluate(10, 10, 0), (4, 1));
        assert_eq!(AluModel::evaluate(15, 15, 0), (14, 1));
    }

    #[test]
    fn fault_overrides_only_its_combination() {
        let mut dut = AluModel::with_faults(vec!["5,3,0,9".parse().unwrap()]);
        dut.write(Signal::A, 5).unwrap();
        dut.write(Signal::B, 3).unwrap();
        dut.write(Signal::Op, 0).unwrap();
        assert_eq!(dut.read(Signal::Out), 9);
        assert_eq!(dut.read(Signal::C), 0);

        dut.write(Signal::B, 4).unwrap();
        assert_eq!(dut.read(Signal::Out), 9);
        dut.write(Signal::B, 2).unwrap();
        assert_eq!(dut.read(Signal::Out), 7);
    }

    #[test]
    fn outputs_are_read_only() {
        let mut dut = AluModel::new();
        assert!(matches!(
            dut.write(Signal::Out, 1),
            Err(HarnessError::ReadOnlySignal(Signal::Out))
        ));
        assert!(dut.write(Signal::C, 1).is_err());
    }

    #[test]
    fn fault_parsing() {
        let fault: Fault = "5, 3, 0, 9, 1".parse().unwrap();
        assert_eq!(fault.out, Some(9));
        assert_eq!(fault.c, Some(1));
        assert!("5,3".parse::<Fault>().is_err());
        assert!("5,3,0,x".parse::<Fault>().is_err());
    }
}
