//! Integration tests for the async playback driver on tokio's paused clock
//!
//! These tests verify that:
//! - Steps are published on the configured cadence
//! - A wake past several deadlines still publishes each step to listeners
//! - A superseded trace's timer never fires
//! - Dropping or disposing the handle stops the task

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use stepwise_algorithms::{create_trace, AlgorithmId, Snapshot, Trace};
use stepwise_playback::{Phase, PlaybackDriver, PlaybackError};

fn sliding_window() -> Arc<Trace<Snapshot>> {
    let input = json!({ "nums": [2, 3, 1, 2, 4, 3], "target": 7 });
    Arc::new(create_trace(AlgorithmId::SlidingWindow, input).unwrap())
}

/// Test that every step is pushed in order when polled by a watcher
#[tokio::test(start_paused = true)]
async fn test_watcher_sees_every_step() {
    let trace = sliding_window();
    let len = trace.len();
    let driver = PlaybackDriver::spawn(trace, 100).unwrap();
    let mut rx = driver.subscribe();
    driver.play();

    let mut cursors = Vec::new();
    while rx.changed().await.is_ok() {
        let snapshot = *rx.borrow_and_update();
        if cursors.last() != Some(&snapshot.cursor) {
            cursors.push(snapshot.cursor);
        }
        if snapshot.phase == Phase::Finished {
            break;
        }
    }

    assert_eq!(cursors, (0..len).collect::<Vec<_>>());
    driver.dispose().await;
}

/// Test that a wake past several deadlines reports each advance separately
#[tokio::test(start_paused = true)]
async fn test_late_wake_publishes_every_step() {
    let trace = sliding_window();
    assert!(trace.len() > 5);
    let driver = PlaybackDriver::spawn(trace, 100).unwrap();
    let mut updates = driver.updates();
    driver.play();

    let idle = updates.recv().await.unwrap();
    assert_eq!((idle.phase, idle.cursor), (Phase::Idle, 0));
    let playing = updates.recv().await.unwrap();
    assert_eq!((playing.phase, playing.cursor), (Phase::Playing, 0));

    tokio::time::advance(Duration::from_millis(350)).await;

    let mut cursors = Vec::new();
    for _ in 0..3 {
        let snapshot = updates.recv().await.unwrap();
        assert_eq!(snapshot.phase, Phase::Playing);
        cursors.push(snapshot.cursor);
    }
    assert_eq!(cursors, vec![1, 2, 3]);
    // the next deadline is still ahead
    assert!(updates.try_recv().is_err());
    assert_eq!(driver.snapshot().cursor, 3);
    driver.dispose().await;
}

/// Test that listeners see the whole run through to the terminal step
#[tokio::test(start_paused = true)]
async fn test_listener_sees_whole_run() {
    let trace = sliding_window();
    let len = trace.len();
    let driver = PlaybackDriver::spawn(trace, 100).unwrap();
    let mut updates = driver.updates();
    driver.play();

    let mut cursors = Vec::new();
    while let Some(snapshot) = updates.recv().await {
        if cursors.last() != Some(&snapshot.cursor) {
            cursors.push(snapshot.cursor);
        }
        if snapshot.phase == Phase::Finished {
            break;
        }
    }

    assert_eq!(cursors, (0..len).collect::<Vec<_>>());
    driver.dispose().await;
}

/// Test that the total playback time matches steps times delay
#[tokio::test(start_paused = true)]
async fn test_cadence() {
    let trace = sliding_window();
    let advances = trace.len() as u32 - 1;
    let driver = PlaybackDriver::spawn(trace, 250).unwrap();

    let start = tokio::time::Instant::now();
    driver.play();
    driver.finished().await.unwrap();
    let expected = Duration::from_millis(250) * advances;
    let elapsed = start.elapsed();
    // tokio timers resolve to whole milliseconds
    assert!(elapsed >= expected && elapsed < expected + Duration::from_millis(5));
}

/// Test that pausing stops the cursor until resumed
#[tokio::test(start_paused = true)]
async fn test_pause_holds_position() {
    let driver = PlaybackDriver::spawn(sliding_window(), 100).unwrap();
    driver.play();
    tokio::time::sleep(Duration::from_millis(350)).await;
    driver.pause();
    tokio::time::sleep(Duration::from_millis(1)).await;

    let paused = driver.snapshot();
    assert_eq!(paused.phase, Phase::Paused);
    assert_eq!(paused.cursor, 3);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(driver.snapshot(), paused);

    driver.play();
    tokio::time::sleep(Duration::from_millis(101)).await;
    assert_eq!(driver.snapshot().cursor, 4);
}

/// Test that replacing the trace mid-playback supersedes its timer
#[tokio::test(start_paused = true)]
async fn test_replace_trace_supersedes_timer() {
    let driver = PlaybackDriver::spawn(sliding_window(), 100).unwrap();
    driver.play();
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(driver.snapshot().cursor, 1);

    let roman = create_trace(AlgorithmId::Roman, json!({ "number": 8 })).unwrap();
    driver.replace_trace(Arc::new(roman));
    tokio::time::sleep(Duration::from_secs(5)).await;

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.cursor, 0);
}

/// Test that speed changes take effect and bad speeds are refused
#[tokio::test(start_paused = true)]
async fn test_speed_change() {
    let driver = PlaybackDriver::spawn(sliding_window(), 1_000).unwrap();
    driver.play();

    assert_eq!(
        driver.set_speed(0).await,
        Err(PlaybackError::InvalidSpeed { ms: 0 })
    );
    driver.set_speed(10).await.unwrap();
    assert_eq!(driver.snapshot().speed_ms, 10);

    tokio::time::sleep(Duration::from_millis(35)).await;
    assert_eq!(driver.snapshot().cursor, 3);
}

/// Test that a dropped handle stops the task
#[tokio::test(start_paused = true)]
async fn test_drop_stops_task() {
    let driver = PlaybackDriver::spawn(sliding_window(), 100).unwrap();
    let mut rx = driver.subscribe();
    driver.play();
    rx.changed().await.unwrap();
    let cursor = rx.borrow_and_update().cursor;

    drop(driver);
    tokio::time::sleep(Duration::from_secs(5)).await;

    // the sender side is gone, and nothing advanced after the drop
    assert!(rx.changed().await.is_err());
    assert_eq!(rx.borrow().cursor, cursor);
}
