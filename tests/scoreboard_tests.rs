//! Unit tests for the scoreboard's checking logic.

use alu_testbench::common::{BugKey, Transaction};
use alu_testbench::core::pipeline::context::StageContext;
use alu_testbench::core::pipeline::latches::mailbox;
use alu_testbench::core::pipeline::stages::{Scoreboard, Verdict};
use alu_testbench::core::units::alu::Expected;
use alu_testbench::core::BugRegistry;
use alu_testbench::sim::SimClock;
use alu_testbench::stats::PipelineStats;

/// Builds a standalone scoreboard and the stats it records into.
fn create_scoreboard() -> (Scoreboard, PipelineStats) {
    let stats = PipelineStats::new();
    let ctx = StageContext::new("Scoreboard", SimClock::start(), stats.clone(), false);
    let (_tx, rx) = mailbox::<Transaction>("mon_scb", 1);
    (Scoreboard::new(ctx, 600, rx, BugRegistry::new()), stats)
}

/// Builds an observed transaction as the monitor would.
fn observed(a: u8, b: u8, op: u8, out: u8, c: u8) -> Transaction {
    Transaction { a, b, op, out, c }
}

/// Tests a plain addition that passes.
#[tokio::test]
async fn test_add_pass() {
    let (mut scb, stats) = create_scoreboard();
    let verdict = scb.check(&observed(5, 3, 0, 8, 0));

    assert_eq!(verdict, Verdict::Pass(Expected { out: 8, carry: 0 }));
    assert!(scb.registry().is_empty());
    let counts = stats.snapshot();
    assert_eq!(counts.scored, 1);
    assert_eq!(counts.passed, 1);
    assert_eq!(counts.failed, 0);
}

/// Tests an addition above the modulus.
#[tokio::test]
async fn test_add_overflow_pass() {
    let (mut scb, _) = create_scoreboard();
    assert!(scb.check(&observed(10, 10, 0, 4, 1)).is_pass());
}

/// Tests an addition landing exactly on the modulus.
#[tokio::test]
async fn test_add_exact_modulus_pass() {
    let (mut scb, _) = create_scoreboard();
    assert!(scb.check(&observed(9, 7, 0, 0, 1)).is_pass());
    assert!(!scb.check(&observed(9, 7, 0, 0, 0)).is_pass());
}

/// Tests the xor selector.
#[tokio::test]
async fn test_xor_pass() {
    let (mut scb, _) = create_scoreboard();
    assert_eq!(
        scb.check(&observed(12, 10, 1, 6, 0)),
        Verdict::Pass(Expected { out: 6, carry: 0 })
    );
}

/// Tests that a wrong result is recorded exactly once.
#[tokio::test]
async fn test_mismatch_recorded_once() {
    let (mut scb, stats) = create_scoreboard();
    let bad = observed(5, 3, 0, 9, 0);

    assert_eq!(
        scb.check(&bad),
        Verdict::Mismatch {
            expected: Some(Expected { out: 8, carry: 0 }),
            new_bug: true
        }
    );
    assert_eq!(
        scb.check(&bad),
        Verdict::Mismatch {
            expected: Some(Expected { out: 8, carry: 0 }),
            new_bug: false
        }
    );

    assert_eq!(scb.registry().len(), 1);
    assert!(scb.registry().contains(&BugKey::new(5, 3, 0)));
    let counts = stats.snapshot();
    assert_eq!(counts.failed, 2);
    assert_eq!(counts.passed, 0);
}

/// Tests that a wrong carry alone is a mismatch.
#[tokio::test]
async fn test_carry_mismatch() {
    let (mut scb, _) = create_scoreboard();
    assert!(!scb.check(&observed(15, 1, 0, 0, 0)).is_pass());
    assert!(!scb.check(&observed(3, 3, 2, 3, 1)).is_pass());
    assert_eq!(scb.registry().len(), 2);
}

/// Tests that distinct failing combinations which would concatenate to the
/// same text stay distinct.
#[tokio::test]
async fn test_bug_keys_distinct() {
    let (mut scb, _) = create_scoreboard();
    scb.check(&observed(1, 12, 0, 0, 0));
    scb.check(&observed(11, 2, 0, 0, 0));

    assert_eq!(scb.registry().len(), 2);
    assert!(scb.registry().contains(&BugKey::new(1, 12, 0)));
    assert!(scb.registry().contains(&BugKey::new(11, 2, 0)));
}

/// Tests that an illegal selector read back from the device is a finding.
#[tokio::test]
async fn test_illegal_op_mismatch() {
    let (mut scb, _) = create_scoreboard();
    assert_eq!(
        scb.check(&observed(1, 2, 7, 3, 0)),
        Verdict::Mismatch {
            expected: None,
            new_bug: true
        }
    );
    assert!(scb.registry().contains(&BugKey::new(1, 2, 7)));
}

/// Tests that checking does not modify the caller's transaction.
#[tokio::test]
async fn test_check_leaves_input_untouched() {
    let (mut scb, _) = create_scoreboard();
    let item = observed(5, 3, 0, 9, 0);
    let before = item;
    scb.check(&item);
    assert_eq!(item, before);
}
