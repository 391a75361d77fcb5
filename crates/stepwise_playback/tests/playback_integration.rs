//! Integration tests for recorded traces + playback controller
//!
//! These tests verify that:
//! - Real algorithm traces play back in order to their terminal step
//! - Pausing and resuming neither skips nor repeats a step
//! - Speed changes never leave two timers alive
//! - A rejected input leaves an existing controller untouched

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use stepwise_algorithms::{create_trace, AlgorithmId, Snapshot, Trace};
use stepwise_playback::{ManualClock, Phase, PlaybackController, UpdateCause};

const SPEED: u64 = 200;

fn dutch_flag() -> Arc<Trace<Snapshot>> {
    let trace = create_trace(AlgorithmId::DutchFlag, json!({ "nums": [2, 0, 2, 1, 1, 0] }))
        .expect("valid input");
    Arc::new(trace)
}

fn player(
    trace: Arc<Trace<Snapshot>>,
) -> (PlaybackController<Snapshot, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let ctl = PlaybackController::with_clock(trace, SPEED, clock.clone()).expect("positive speed");
    (ctl, clock)
}

/// Record every cursor pushed to subscribers
fn record_cursors(ctl: &mut PlaybackController<Snapshot, ManualClock>) -> Arc<Mutex<Vec<usize>>> {
    let cursors = Arc::new(Mutex::new(Vec::new()));
    let sink = cursors.clone();
    ctl.subscribe(move |update| {
        if update.cause == UpdateCause::Advance {
            sink.lock().push(update.cursor);
        }
    });
    cursors
}

/// Test that uninterrupted playback visits every step exactly once
#[test]
fn test_monotonic_playback() {
    let trace = dutch_flag();
    let len = trace.len();
    let (mut ctl, clock) = player(trace);
    let cursors = record_cursors(&mut ctl);

    ctl.play();
    while ctl.phase() == Phase::Playing {
        clock.advance_ms(SPEED);
        ctl.tick();
    }

    assert_eq!(ctl.phase(), Phase::Finished);
    assert_eq!(*cursors.lock(), (1..len).collect::<Vec<_>>());

    match &ctl.current_step().payload {
        Snapshot::DutchFlag(state) => assert_eq!(state.nums, vec![0, 0, 1, 1, 2, 2]),
        other => panic!("unexpected payload {other:?}"),
    }
}

/// Test that the sequence with a pause matches the one without
#[test]
fn test_pause_resume_fidelity() {
    let trace = dutch_flag();
    let len = trace.len();
    let (mut ctl, clock) = player(trace);
    let cursors = record_cursors(&mut ctl);

    ctl.play();
    for _ in 0..3 {
        clock.advance_ms(SPEED);
        ctl.tick();
    }
    clock.advance_ms(SPEED / 2);
    ctl.pause();
    clock.advance_ms(SPEED * 20);
    ctl.tick();
    assert_eq!(ctl.cursor(), 3);

    ctl.play();
    while ctl.phase() == Phase::Playing {
        clock.advance_ms(SPEED);
        ctl.tick();
    }
    assert_eq!(*cursors.lock(), (1..len).collect::<Vec<_>>());
}

/// Test that repeated speed changes keep exactly one timer and one cadence
#[test]
fn test_speed_change_safety() {
    let (mut ctl, clock) = player(dutch_flag());
    let cursors = record_cursors(&mut ctl);

    ctl.play();
    let mut seen = Vec::new();
    for ms in [50, 400, 10, 75, 75] {
        clock.advance_ms(5);
        ctl.set_speed(ms).unwrap();
        let timer = ctl.pending_timer().expect("still playing");
        assert!(!seen.contains(&timer.id), "timer ids are never reused");
        seen.push(timer.id);
    }

    // only the last timer is live: one advance per 75 ms
    clock.advance_ms(74);
    assert_eq!(ctl.tick(), 0);
    clock.advance_ms(1);
    assert_eq!(ctl.tick(), 1);
    assert_eq!(*cursors.lock(), vec![1]);
}

/// Test that reset from any phase lands in the same state
#[test]
fn test_reset_idempotence() {
    let (mut ctl, clock) = player(dutch_flag());
    ctl.set_speed(120).unwrap();
    let mut resets = Vec::new();

    ctl.reset();
    resets.push(ctl.state());

    ctl.play();
    clock.advance_ms(240);
    ctl.tick();
    ctl.reset();
    resets.push(ctl.state());

    ctl.jump_to(3).unwrap();
    ctl.reset();
    ctl.reset();
    resets.push(ctl.state());

    let last = ctl.trace().last_index();
    ctl.jump_to(last).unwrap();
    ctl.reset();
    resets.push(ctl.state());

    for state in &resets {
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.speed_ms, 120);
        assert!(state.pending.is_none());
    }
}

/// Test that a rejected input does not disturb what is already playing
#[test]
fn test_failed_recording_leaves_controller_untouched() {
    let (mut ctl, clock) = player(dutch_flag());
    ctl.play();
    clock.advance_ms(SPEED);
    ctl.tick();
    let before = ctl.state();

    let err = create_trace(AlgorithmId::DoubleOriginal, json!({ "changed": [1, 2, 4] })).unwrap_err();
    assert_eq!(err.algorithm, "double-original");
    if let Ok(trace) = create_trace(AlgorithmId::DoubleOriginal, json!({ "changed": [1, 2, 4] })) {
        ctl.replace_trace(Arc::new(trace));
    }

    assert_eq!(ctl.state(), before);
}

/// Test that switching algorithms supersedes the old trace's timer
#[test]
fn test_switching_algorithms() {
    let (mut ctl, clock) = player(dutch_flag());
    ctl.play();
    let stale = ctl.pending_timer().unwrap();

    let roman = create_trace(AlgorithmId::Roman, json!({ "number": 1994 })).unwrap();
    ctl.replace_trace(Arc::new(roman));
    assert_eq!(ctl.phase(), Phase::Idle);

    clock.advance_ms(SPEED * 5);
    assert_eq!(ctl.tick(), 0);
    assert!(!ctl.fire(stale.id));
    assert!(matches!(ctl.current_step().payload, Snapshot::Roman(_)));
}
