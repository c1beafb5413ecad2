//! Property-based tests for the room engine.
//!
//! Random command sequences, interleaved with virtual time, run against the
//! standard invariant registry. The driver checks invariants after every
//! operation and every fired timer, so a failing case names the exact step.

use std::time::Duration;

use castor_harness::{InvariantRegistry, Operation, SimDriver};
use proptest::prelude::*;

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        2 => prop_oneof![Just(String::new()), Just("auto".to_string()), Just("wss://x".to_string())]
            .prop_map(|server| Operation::Create { server }),
        2 => "[a-zA-Z0-9 ]{0,8}".prop_map(|code| Operation::Join { code }),
        1 => Just(Operation::Leave),
        1 => "[a-zA-Z ]{0,8}".prop_map(Operation::Rename),
        3 => "[ -~]{0,20}".prop_map(Operation::Send),
        1 => Just(Operation::ToggleMute),
        1 => Just(Operation::ToggleCamera),
        1 => Just(Operation::ToggleScreenShare),
        1 => Just(Operation::ToggleHand),
        1 => (0usize..8).prop_map(Operation::MuteOther),
        1 => (0usize..8).prop_map(Operation::KickOther),
        1 => any::<u64>().prop_map(Operation::ShareFile),
        1 => "[ -~]{0,80}".prop_map(Operation::ShareClipboard),
        4 => (0u64..8_000).prop_map(|ms| Operation::Advance(Duration::from_millis(ms))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Invariants hold under arbitrary command sequences.
    #[test]
    fn invariants_hold_under_random_commands(
        seed in any::<u64>(),
        operations in prop::collection::vec(operation_strategy(), 1..60),
    ) {
        let mut driver = SimDriver::new(seed).with_invariants(InvariantRegistry::standard());
        for operation in &operations {
            // Rejected creates and joins are expected; invariants still run.
            let _ = driver.apply(operation);
        }
    }

    /// Once a session is left, no amount of time changes anything.
    #[test]
    fn nothing_happens_after_leave(
        seed in any::<u64>(),
        operations in prop::collection::vec(operation_strategy(), 0..30),
    ) {
        let mut driver = SimDriver::new(seed).with_invariants(InvariantRegistry::standard());
        for operation in &operations {
            let _ = driver.apply(operation);
        }
        driver.engine_mut().leave_room();

        let recorder = driver.record();
        prop_assert_eq!(driver.advance(Duration::from_secs(60)), 0);
        prop_assert_eq!(recorder.count(), 1);
    }

    /// Demo roster never exceeds the local user plus the arrival cap.
    #[test]
    fn demo_roster_is_bounded(seed in any::<u64>(), secs in 0u64..120) {
        let mut driver = SimDriver::new(seed).with_invariants(InvariantRegistry::standard());
        driver.engine_mut().create_room("Ada", "").unwrap();
        driver.advance(Duration::from_secs(secs));

        let max = driver.engine().config().demo.max_arrivals;
        prop_assert!(driver.engine().room().participants.len() <= max + 1);
    }

    /// Same seed, same operations: identical views.
    #[test]
    fn runs_are_reproducible(
        seed in any::<u64>(),
        operations in prop::collection::vec(operation_strategy(), 1..30),
    ) {
        let run = || {
            let mut driver = SimDriver::new(seed);
            for operation in &operations {
                let _ = driver.apply(operation);
            }
            driver.engine().view()
        };
        prop_assert_eq!(run(), run());
    }
}
