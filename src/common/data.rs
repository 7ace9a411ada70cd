//! Transaction Types.
//!
//! This module defines the record that flows through the verification
//! pipeline. The same structure carries stimulus (written by the generator)
//! and response (overwritten by the monitor from sampled DUT signals), and
//! doubles as the randomization unit.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::common::constants::{OPERAND_MAX, OP_MAX};
use crate::common::error::HarnessError;

/// Operation selected by the `op` input of the ALU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AluOp {
    /// 4-bit addition with carry-out.
    Add,
    /// Bitwise exclusive OR.
    Xor,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
}

impl AluOp {
    /// Every operation, in selector order.
    pub const ALL: [AluOp; 4] = [AluOp::Add, AluOp::Xor, AluOp::And, AluOp::Or];

    /// Returns the selector encoding driven on the `op` signal.
    pub fn encoding(self) -> u8 {
        match self {
            AluOp::Add => 0,
            AluOp::Xor => 1,
            AluOp::And => 2,
            AluOp::Or => 3,
        }
    }

    /// Short mnemonic used in log lines.
    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Xor => "XOR",
            AluOp::And => "AND",
            AluOp::Or => "OR",
        }
    }
}

impl TryFrom<u8> for AluOp {
    type Error = HarnessError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AluOp::Add),
            1 => Ok(AluOp::Xor),
            2 => Ok(AluOp::And),
            3 => Ok(AluOp::Or),
            other => Err(HarnessError::IllegalOp(other)),
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// One stimulus/response record.
///
/// `a`, `b` and `op` are assigned by the generator. The monitor replaces all
/// five fields with the values it samples from the DUT, so a transaction that
/// reaches the scoreboard describes what the device actually saw and produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    /// First operand, `0..=15`.
    pub a: u8,
    /// Second operand, `0..=15`.
    pub b: u8,
    /// Operation selector, `0..=3`.
    pub op: u8,
    /// Observed carry flag.
    pub c: u8,
    /// Observed result.
    pub out: u8,
}

impl Transaction {
    /// Creates a stimulus-only transaction with cleared outputs.
    pub fn new(a: u8, b: u8, op: u8) -> Self {
        Self {
            a,
            b,
            op,
            ..Self::default()
        }
    }

    /// Draws fresh operands and selector.
    ///
    /// `a` and `b` are uniform over `0..=15` and `op` over `0..=3`, drawn
    /// independently. Every combination is legal, so nothing is rejected.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.a = rng.gen_range(0..=OPERAND_MAX);
        self.b = rng.gen_range(0..=OPERAND_MAX);
        self.op = rng.gen_range(0..=OP_MAX);
    }

    /// Copies every field of `source` into `self`.
    pub fn copy_data(&mut self, source: &Transaction) {
        self.a = source.a;
        self.b = source.b;
        self.op = source.op;
        self.c = source.c;
        self.out = source.out;
    }

    /// Key identifying this transaction's input combination.
    pub fn key(&self) -> BugKey {
        BugKey::new(self.a, self.b, self.op)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "a={:#b} b={:#b} op={:#b} c={:#b} out={:#b}",
            self.a, self.b, self.op, self.c, self.out
        )
    }
}

/// Canonical key of a failing input combination.
///
/// Ordering is lexicographic on `(a, b, op)`, which keeps registry dumps
/// deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BugKey {
    pub a: u8,
    pub b: u8,
    pub op: u8,
}

impl BugKey {
    pub fn new(a: u8, b: u8, op: u8) -> Self {
        Self { a, b, op }
    }
}

impl fmt::Display for BugKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.a, self.b, self.op)
    }
}
