//! End-to-end cycles against mock peripherals.
//!
//! Every test runs on a paused tokio clock, so holds and windows elapse
//! instantly and durations can be asserted exactly.

mod common;

use std::time::Duration;

use common::{answering_rig, peripherals, rig_with, silent_rig};
use helmgate_gate::{CycleOutcome, Gate, GateConfig, GateError};
use helmgate_hardware::mock::{MockDisplay, MockLink};
use helmgate_hardware::{ActuatorState, SignalLevel, WakeTrigger};
use rstest::rstest;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_valid_identifier_granted_end_to_end() {
    let mut rig = answering_rig(b"1\n").await;
    rig.visitor("0002").await;

    let outcome = rig.gate.run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Granted);
    assert_eq!(rig.link.sent(), vec!["Motion detected!", "ID_OK"]);
    assert_eq!(
        rig.display.rendered(),
        vec![
            "Sleeping",
            "ID: 0",
            "ID: 00",
            "ID: 000",
            "ID: 0002",
            "Checking...",
            "Access Granted",
        ]
    );
    assert_eq!(rig.relay.intervals_at(SignalLevel::Low), vec![Duration::from_secs(3)]);
    assert_eq!(
        rig.relay.levels(),
        vec![SignalLevel::High, SignalLevel::Low, SignalLevel::High]
    );
    assert_eq!(rig.link.bytes_read(), 2);
    assert_eq!(rig.gate.relay_state(), ActuatorState::Released);

    // Back to sleep on the next cycle.
    rig.spurious_wake();
    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::SpuriousWake);
    assert_eq!(rig.display.current().as_deref(), Some("Sleeping"));
}

#[tokio::test(start_paused = true)]
async fn test_granted_cycle_timing() {
    let mut rig = answering_rig(b"1\n").await;
    rig.visitor("0001").await;
    let start = Instant::now();

    rig.gate.run_cycle().await;

    // settle + grant hold + cooldown
    assert_eq!(start.elapsed(), Duration::from_millis(100 + 3_000 + 2_000));
}

#[rstest]
#[case(b'0')]
#[case(b'2')]
#[case(b'\n')]
#[case(b'L')]
#[case(0xFF)]
#[tokio::test(start_paused = true)]
async fn test_any_other_byte_denies(#[case] byte: u8) {
    let mut rig = silent_rig().await;
    rig.visitor("0003").await;
    rig.link.push_bytes(&[byte, b'\n']);

    let outcome = rig.gate.run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Denied { byte });
    assert!(!rig.relay.was_driven(SignalLevel::Low));
    let rendered = rig.display.rendered();
    assert_eq!(
        &rendered[rendered.len() - 3..],
        ["Checking...", "Helmet Missing", "Access Denied"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_denied_holds_helmet_missing() {
    let mut rig = answering_rig(b"0\n").await;
    rig.visitor("0003").await;
    let start = Instant::now();

    rig.gate.run_cycle().await;

    // settle + denial hold + cooldown
    assert_eq!(start.elapsed(), Duration::from_millis(100 + 3_000 + 2_000));
    assert_eq!(rig.display.current().as_deref(), Some("Access Denied"));
}

#[tokio::test(start_paused = true)]
async fn test_silent_host_times_out() {
    let mut rig = silent_rig().await;
    rig.visitor("0004").await;
    let start = Instant::now();

    let outcome = rig.gate.run_cycle().await;

    assert_eq!(outcome, CycleOutcome::TimedOut);
    assert_eq!(rig.display.current().as_deref(), Some("PC Timeout"));
    assert_eq!(rig.relay.levels(), vec![SignalLevel::High]);
    // settle + window + timeout hold + cooldown
    assert!(start.elapsed() >= Duration::from_millis(100 + 10_000 + 2_000 + 2_000));
}

#[tokio::test(start_paused = true)]
async fn test_answer_late_in_window_is_honoured() {
    let mut rig = silent_rig().await;
    rig.visitor("0002").await;

    let link = rig.link.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(9_500)).await;
        link.push_bytes(b"1\n");
    });

    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::Granted);
    assert_eq!(rig.relay.intervals_at(SignalLevel::Low), vec![Duration::from_secs(3)]);
}

#[tokio::test(start_paused = true)]
async fn test_answer_after_window_is_not_consumed() {
    let mut rig = silent_rig().await;
    rig.visitor("0002").await;

    let link = rig.link.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        link.push_bytes(b"1\n");
    });

    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::TimedOut);
    assert!(!rig.relay.was_driven(SignalLevel::Low));
    assert_eq!(rig.link.pending(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_missing_terminator_result_stands() {
    let mut rig = answering_rig(b"1").await;
    rig.visitor("0001").await;

    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::Granted);
    assert_eq!(rig.link.bytes_read(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_only_two_bytes_consumed() {
    let mut rig = answering_rig(b"1\n1\n").await;
    rig.visitor("0001").await;

    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::Granted);
    assert_eq!(rig.link.bytes_read(), 2);
    assert_eq!(rig.link.pending(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_terminator_byte_not_validated() {
    let mut rig = answering_rig(b"1X").await;
    rig.visitor("0001").await;

    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::Granted);
    assert_eq!(rig.link.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_identifier_rejected_without_remote_call() {
    let mut rig = answering_rig(b"1\n").await;
    rig.visitor("9999").await;
    let start = Instant::now();

    let outcome = rig.gate.run_cycle().await;

    assert_eq!(
        outcome,
        CycleOutcome::Invalid {
            value: "9999".into()
        }
    );
    assert_eq!(rig.link.sent(), vec!["Motion detected!", "Invalid ID: 9999"]);
    assert_eq!(rig.link.bytes_read(), 0);
    assert!(!rig.relay.was_driven(SignalLevel::Low));
    assert_eq!(rig.display.current().as_deref(), Some("Invalid ID"));
    // settle + invalid hold + cooldown
    assert_eq!(start.elapsed(), Duration::from_millis(100 + 2_000 + 2_000));
}

#[rstest]
#[case("000*0002")]
#[case("000#0002")]
#[case("9*#0002")]
#[tokio::test(start_paused = true)]
async fn test_clear_discards_partial_entry(#[case] keys: &str) {
    let mut rig = answering_rig(b"1\n").await;
    rig.visitor(keys).await;

    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::Granted);
    assert!(rig.display.rendered().contains(&"Cleared".to_string()));
    assert!(rig.display.rendered().contains(&"ID: 0002".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_spurious_wake_skips_cooldown() {
    let mut rig = silent_rig().await;
    rig.spurious_wake();
    let start = Instant::now();

    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::SpuriousWake);

    assert_eq!(start.elapsed(), Duration::from_millis(100));
    assert_eq!(rig.motion.read_count(), 1);
    assert!(rig.link.sent().is_empty());
    assert_eq!(rig.display.rendered(), vec!["Sleeping"]);
}

#[tokio::test(start_paused = true)]
async fn test_wake_source_armed_every_cycle() {
    let mut rig = silent_rig().await;
    rig.spurious_wake();
    rig.spurious_wake();

    rig.gate.run_cycle().await;
    rig.gate.run_cycle().await;

    assert_eq!(rig.power.trigger(), Some(WakeTrigger::level(SignalLevel::High)));
    assert_eq!(rig.power.suspension_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_no_state_carries_between_cycles() {
    let mut rig = answering_rig(b"1\n").await;

    rig.visitor("9999").await;
    rig.gate.run_cycle().await;
    assert_eq!(rig.gate.capture().buffer(), "");

    rig.visitor("0002").await;
    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::Granted);

    let stats = rig.gate.stats();
    assert_eq!(stats.cycles, 2);
    assert_eq!(stats.invalid, 1);
    assert_eq!(stats.granted, 1);
    assert_eq!(rig.gate.last_outcome(), Some(&CycleOutcome::Granted));
}

#[tokio::test(start_paused = true)]
async fn test_relay_fault_absorbed_and_released() {
    let mut rig = answering_rig(b"1\n").await;
    rig.relay.set_failing(true);
    rig.visitor("0002").await;

    let outcome = rig.gate.run_cycle().await;

    assert!(matches!(outcome, CycleOutcome::Faulted { .. }));
    assert_eq!(rig.gate.relay_state(), ActuatorState::Released);
    assert!(!rig.relay.was_driven(SignalLevel::Low));
    assert_eq!(rig.gate.stats().faults, 1);

    rig.relay.set_failing(false);
    rig.visitor("0002").await;
    assert_eq!(rig.gate.run_cycle().await, CycleOutcome::Granted);
}

#[tokio::test(start_paused = true)]
async fn test_link_fault_absorbed() {
    let mut rig = silent_rig().await;
    rig.link.close();
    rig.visitor("0002").await;

    match rig.gate.run_cycle().await {
        CycleOutcome::Faulted { error } => assert!(error.contains("closed")),
        other => panic!("expected fault, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_display_init_failure_is_fatal() {
    let (peripherals, handles) = peripherals(MockDisplay::failing(), MockLink::new());

    let result = Gate::start(GateConfig::default(), peripherals).await;

    assert!(matches!(result, Err(GateError::DisplayInit(_))));
    assert!(handles.relay.levels().is_empty());
    assert_eq!(handles.power.suspension_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_config_rejected_at_start() {
    let (peripherals, handles) = peripherals(MockDisplay::new(), MockLink::new());
    let config = GateConfig::default().with_verification_window(Duration::ZERO);

    let result = Gate::start(config, peripherals).await;

    assert!(matches!(result, Err(GateError::Config(_))));
    assert!(!handles.display.is_initialized());
}

#[tokio::test(start_paused = true)]
async fn test_start_releases_relay() {
    let rig = silent_rig().await;

    assert!(rig.display.is_initialized());
    assert_eq!(rig.relay.levels(), vec![SignalLevel::High]);
    assert_eq!(rig.gate.relay_state(), ActuatorState::Released);
}

#[tokio::test(start_paused = true)]
async fn test_active_high_relay() {
    let link = MockLink::with_responder(Box::new(|line: &str| {
        (line == "ID_OK").then(|| b"1\n".to_vec())
    }));
    let config = GateConfig::default().with_relay_polarity(helmgate_hardware::Polarity::ActiveHigh);
    let mut rig = rig_with(config, link).await;
    rig.visitor("0002").await;

    rig.gate.run_cycle().await;

    assert_eq!(rig.relay.intervals_at(SignalLevel::High), vec![Duration::from_secs(3)]);
}

#[tokio::test(start_paused = true)]
async fn test_run_keeps_cycling() {
    let mut rig = answering_rig(b"1\n").await;
    rig.visitor("0002").await;

    let stopped = tokio::time::timeout(Duration::from_secs(60), rig.gate.run()).await;

    assert!(stopped.is_err());
    assert_eq!(rig.gate.stats().granted, 1);
    assert!(rig.power.is_suspended());
    assert_eq!(rig.power.suspension_count(), 2);
}
