//! Scenario tests for a full demo session.
//!
//! Walks through what a user sees in the first minute of a demo room and
//! checks the timeline against the presence simulator's tuning.

use std::time::Duration;

use castor_core::{DemoConfig, EngineConfig, NoticeKind, ParticipantStatus, config::DEMO_MESSAGES};
use castor_harness::{InvariantRegistry, Operation, SimDriver};

fn demo_driver(seed: u64) -> SimDriver {
    let mut driver = SimDriver::new(seed).with_invariants(InvariantRegistry::standard());
    driver.apply(&Operation::Create { server: String::new() }).unwrap();
    driver
}

fn tuned_demo_driver(seed: u64, demo: DemoConfig) -> SimDriver {
    let mut driver = SimDriver::with_config(seed, EngineConfig { demo })
        .with_invariants(InvariantRegistry::standard());
    driver.apply(&Operation::Create { server: String::new() }).unwrap();
    driver
}

/// One demo participant, no chatter, every flicker tick toggles.
fn single_speaker() -> DemoConfig {
    DemoConfig {
        min_arrivals: 1,
        max_arrivals: 1,
        muted_probability: 0.0,
        chat_probability: 0.0,
        speaking_probability: 1.0,
        ..DemoConfig::default()
    }
}

fn demo_speaking(driver: &SimDriver) -> Vec<bool> {
    let engine = driver.engine();
    engine.room().participants.others(engine.local_id()).iter().map(|p| p.is_speaking).collect()
}

#[test]
fn arrivals_land_on_two_second_grid() {
    let mut driver = demo_driver(8);
    let mut arrival_times = Vec::new();
    let mut seen = 1;

    for _ in 0..80 {
        driver.advance(Duration::from_millis(100));
        let count = driver.engine().room().participants.len();
        if count > seen {
            arrival_times.push(driver.elapsed());
            seen = count;
        }
    }

    assert!(arrival_times.len() >= 2);
    for (slot, at) in arrival_times.iter().enumerate() {
        let expected = Duration::from_millis(1000 + 2000 * slot as u64);
        assert_eq!(*at, expected);
    }
}

#[test]
fn chat_generator_posts_only_demo_lines() {
    for seed in 0..10 {
        let mut driver = demo_driver(seed);
        driver.advance(Duration::from_secs(120));

        for message in driver.engine().chat().messages() {
            assert!(!message.is_own);
            assert!(DEMO_MESSAGES.contains(&message.content.as_str()));
            assert_ne!(message.author, driver.engine().local_name());
        }
    }
}

#[test]
fn chat_generator_eventually_posts() {
    let posted = (0..10).any(|seed| {
        let mut driver = demo_driver(seed);
        driver.advance(Duration::from_secs(120));
        !driver.engine().chat().messages().is_empty()
    });
    assert!(posted);
}

#[test]
fn speaking_flicker_never_touches_local_user() {
    for seed in 0..10 {
        let mut driver = demo_driver(seed);
        for _ in 0..40 {
            driver.advance(Duration::from_secs(3));
            let view = driver.engine().view();
            let local = view.participants.iter().find(|p| p.is_you).unwrap();
            assert_ne!(local.status, ParticipantStatus::Speaking);
        }
    }
}

#[test]
fn kicked_demo_participant_stays_gone() {
    let mut driver = demo_driver(4);
    driver.advance(Duration::from_secs(8));
    let before = driver.engine().room().participants.len();

    assert!(driver.apply(&Operation::KickOther(0)).unwrap());
    driver.advance(Duration::from_secs(60));

    assert_eq!(driver.engine().room().participants.len(), before - 1);
    let removed = driver
        .engine()
        .chat()
        .notices()
        .iter()
        .filter(|n| n.kind == NoticeKind::ParticipantRemoved)
        .count();
    assert_eq!(removed, 1);
}

#[test]
fn leave_mid_arrival_cancels_the_rest() {
    let mut driver = demo_driver(6);
    driver.advance(Duration::from_millis(1500));
    assert_eq!(driver.engine().room().participants.len(), 2);

    driver.apply(&Operation::Leave).unwrap();
    assert_eq!(driver.engine().scheduler().pending(), 0);
    assert_eq!(driver.advance(Duration::from_secs(30)), 0);
    assert!(driver.engine().room().participants.is_empty());
}

#[test]
fn speaking_flicker_toggles_on_every_tick() {
    let mut driver = tuned_demo_driver(11, single_speaker());

    driver.advance(Duration::from_millis(2999));
    assert_eq!(demo_speaking(&driver), [false]);

    driver.advance(Duration::from_millis(1));
    assert_eq!(demo_speaking(&driver), [true]);
    let view = driver.engine().view();
    assert_eq!(view.participants[1].status, ParticipantStatus::Speaking);

    driver.advance(Duration::from_millis(3000));
    assert_eq!(demo_speaking(&driver), [false]);

    driver.advance(Duration::from_millis(3000));
    assert_eq!(demo_speaking(&driver), [true]);
}

#[test]
fn speaking_flicker_can_be_silenced() {
    let demo = DemoConfig { speaking_probability: 0.0, ..single_speaker() };
    let mut driver = tuned_demo_driver(12, demo);

    driver.advance(Duration::from_secs(30));
    assert_eq!(demo_speaking(&driver), [false]);
}

#[test]
fn arrivals_take_mute_and_camera_from_tuning() {
    for (probability, expected) in [(1.0, true), (0.0, false)] {
        for seed in 0..5 {
            let demo = DemoConfig {
                muted_probability: probability,
                camera_probability: probability,
                ..DemoConfig::default()
            };
            let mut driver = tuned_demo_driver(seed, demo);
            driver.advance(Duration::from_secs(8));

            let engine = driver.engine();
            let others = engine.room().participants.others(engine.local_id());
            assert!(others.len() >= 2, "seed {seed}");
            for participant in others {
                assert_eq!(participant.is_muted, expected, "seed {seed}: {}", participant.name);
                assert_eq!(participant.is_camera_on, expected, "seed {seed}: {}", participant.name);
            }

            // The local tile is always present; demo tiles only with the camera on.
            let tiles = engine.view().camera_tiles.len();
            let expected_tiles = if expected { engine.room().participants.len() } else { 1 };
            assert_eq!(tiles, expected_tiles, "seed {seed}");
        }
    }
}
