//! Unit tests for the reference ALU model.

use alu_testbench::common::AluOp;
use alu_testbench::core::units::alu::{Expected, ReferenceAlu};
use alu_testbench::soc::AluModel;

/// Tests additions that stay below the modulus.
#[test]
fn test_add_without_carry() {
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 5, 3),
        Expected { out: 8, carry: 0 }
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 0, 0),
        Expected { out: 0, carry: 0 }
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 15, 0),
        Expected { out: 15, carry: 0 }
    );
}

/// Tests a sum of exactly 16.
#[test]
fn test_add_exact_modulus() {
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 9, 7),
        Expected { out: 0, carry: 1 }
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 8, 8),
        Expected { out: 0, carry: 1 }
    );
}

/// Tests sums above 16.
#[test]
fn test_add_with_carry() {
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 10, 10),
        Expected { out: 4, carry: 1 }
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 15, 15),
        Expected { out: 14, carry: 1 }
    );
}

/// Tests the bitwise operations.
#[test]
fn test_bitwise_ops() {
    assert_eq!(
        ReferenceAlu::execute(AluOp::Xor, 0b1100, 0b1010),
        Expected {
            out: 0b0110,
            carry: 0
        }
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::And, 0b1100, 0b1010),
        Expected {
            out: 0b1000,
            carry: 0
        }
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::Or, 0b1100, 0b1010),
        Expected {
            out: 0b1110,
            carry: 0
        }
    );
}

/// Tests that addition always satisfies `out + 16 * carry == a + b`.
#[test]
fn test_add_exhaustive_identity() {
    for a in 0..=15u8 {
        for b in 0..=15u8 {
            let e = ReferenceAlu::execute(AluOp::Add, a, b);
            assert!(e.out <= 15, "out out of range for {}+{}", a, b);
            assert!(e.carry <= 1);
            assert_eq!(e.out as u16 + 16 * e.carry as u16, a as u16 + b as u16);
        }
    }
}

/// Tests that bitwise results are never carried and stay in range.
#[test]
fn test_bitwise_exhaustive() {
    for op in [AluOp::Xor, AluOp::And, AluOp::Or] {
        for a in 0..=15u8 {
            for b in 0..=15u8 {
                let e = ReferenceAlu::execute(op, a, b);
                assert_eq!(e.carry, 0);
                assert!(e.out <= 15);
            }
        }
    }
}

/// Tests that the behavioral device agrees with the reference everywhere.
#[test]
fn test_behavioral_model_matches_reference() {
    for op in AluOp::ALL {
        for a in 0..=15u8 {
            for b in 0..=15u8 {
                let e = ReferenceAlu::execute(op, a, b);
                assert_eq!(
                    AluModel::evaluate(a, b, op.encoding()),
                    (e.out, e.carry),
                    "a={} b={} op={}",
                    a,
                    b,
                    op
                );
            }
        }
    }
}

/// Tests that operands wider than 4 bits are reduced to their low nibble.
#[test]
fn test_operands_masked() {
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 255, 255),
        ReferenceAlu::execute(AluOp::Add, 15, 15)
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::Add, 0x19, 0x27),
        Expected { out: 0, carry: 1 }
    );
    assert_eq!(
        ReferenceAlu::execute(AluOp::Or, 0xF0, 0x01),
        Expected { out: 1, carry: 0 }
    );
}

/// Tests operation selector decoding.
#[test]
fn test_op_decoding() {
    assert_eq!(AluOp::try_from(0).unwrap(), AluOp::Add);
    assert_eq!(AluOp::try_from(1).unwrap(), AluOp::Xor);
    assert_eq!(AluOp::try_from(2).unwrap(), AluOp::And);
    assert_eq!(AluOp::try_from(3).unwrap(), AluOp::Or);
    assert!(AluOp::try_from(4).is_err());
}
