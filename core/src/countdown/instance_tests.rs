//! Tests for the countdown state machine and per-frame advance
//!
//! Frames are driven by calling `advance` directly with a manual clock.

use std::rc::Rc;

use countdown_types::CountdownConfig;

use super::{Countdown, CountdownState, EventKind, EventReceiver, event_channel};
use crate::clock::{Clock, ManualClock};

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

const T0: u64 = 1_700_000_000_000;

fn manual(time_ms: i64) -> CountdownConfig {
    CountdownConfig::with_time(time_ms).auto_start(false)
}

fn make(config: CountdownConfig) -> (Countdown, ManualClock, EventReceiver) {
    let clock = ManualClock::new(T0);
    let (tx, rx) = event_channel();
    let countdown = Countdown::with_events(&config, Rc::new(clock.clone()), tx);
    (countdown, clock, rx)
}

fn drain(rx: &mut EventReceiver) -> Vec<EventKind> {
    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.kind);
    }
    kinds
}

fn ticks(kinds: &[EventKind]) -> Vec<u64> {
    kinds
        .iter()
        .filter_map(|k| match k {
            EventKind::Tick { remain_ms } => Some(*remain_ms),
            _ => None,
        })
        .collect()
}

fn finishes(kinds: &[EventKind]) -> usize {
    kinds.iter().filter(|k| **k == EventKind::Finish).count()
}

// ═══════════════════════════════════════════════════════════════════════════
// State machine
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_new_manual_countdown_is_paused_at_full_time() {
    let (countdown, _, mut rx) = make(manual(5_000));

    assert_eq!(countdown.state(), CountdownState::Paused);
    assert_eq!(countdown.remain(), 5_000);
    assert_eq!(countdown.end_time(), None);
    // Initial reset requests a render
    assert_eq!(drain(&mut rx), vec![EventKind::Render]);
}

#[test]
fn test_auto_start_plays_immediately() {
    let (countdown, _, _) = make(CountdownConfig::with_time(5_000));

    assert_eq!(countdown.state(), CountdownState::Playing);
    assert_eq!(countdown.end_time(), Some(T0 + 5_000));
}

#[test]
fn test_start_sets_end_time() {
    let (mut countdown, _, _) = make(manual(5_000));

    countdown.start();
    assert_eq!(countdown.state(), CountdownState::Playing);
    assert_eq!(countdown.end_time(), Some(T0 + 5_000));
}

#[test]
fn test_start_while_playing_is_noop() {
    let (mut countdown, clock, _) = make(manual(5_000));

    countdown.start();
    clock.advance(1_500);
    countdown.start();
    assert_eq!(countdown.end_time(), Some(T0 + 5_000));
}

#[test]
fn test_pause_freezes_remain_at_last_tick() {
    let (mut countdown, clock, _) = make(manual(5_000));
    countdown.start();

    clock.advance(1_200);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 3_800);

    // Time passes without a frame: remain is not recomputed on pause
    clock.advance(700);
    countdown.pause();
    assert_eq!(countdown.state(), CountdownState::Paused);
    assert_eq!(countdown.remain(), 3_800);

    // Resuming continues from the frozen value
    clock.advance(10_000);
    countdown.start();
    assert_eq!(countdown.end_time(), Some(clock.now_ms() + 3_800));
}

#[test]
fn test_reset_restores_full_time() {
    let (mut countdown, clock, mut rx) = make(manual(5_000));
    countdown.start();
    clock.advance(2_500);
    countdown.advance(clock.now_ms());
    drain(&mut rx);

    countdown.reset();
    assert_eq!(countdown.state(), CountdownState::Paused);
    assert_eq!(countdown.remain(), 5_000);
    assert_eq!(drain(&mut rx), vec![EventKind::Render]);
}

#[test]
fn test_reset_with_auto_start_restarts() {
    let (mut countdown, clock, _) = make(CountdownConfig::with_time(5_000));
    clock.advance(2_000);
    countdown.reset();

    assert_eq!(countdown.state(), CountdownState::Playing);
    assert_eq!(countdown.end_time(), Some(clock.now_ms() + 5_000));
}

#[test]
fn test_set_time_clamps_negative_to_zero() {
    let (mut countdown, _, _) = make(manual(5_000));

    countdown.set_time(-250);
    assert_eq!(countdown.time(), 0);
    assert_eq!(countdown.remain(), 0);
    assert_eq!(countdown.state(), CountdownState::Paused);
}

#[test]
fn test_set_time_resets() {
    let (mut countdown, clock, _) = make(CountdownConfig::with_time(5_000));
    clock.advance(3_000);
    countdown.advance(clock.now_ms());

    countdown.set_time(8_000);
    assert_eq!(countdown.remain(), 8_000);
    assert_eq!(countdown.end_time(), Some(clock.now_ms() + 8_000));
}

// ═══════════════════════════════════════════════════════════════════════════
// Advance
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_runs_to_finish_exactly_once() {
    let (mut countdown, clock, mut rx) = make(manual(5_000));
    countdown.start();
    drain(&mut rx);

    clock.advance(5_001);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 0);
    assert_eq!(countdown.state(), CountdownState::Playing);

    // The sweep after remain hits zero performs the transition
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.state(), CountdownState::Finished);

    countdown.advance(clock.now_ms());
    countdown.advance(clock.now_ms());

    let kinds = drain(&mut rx);
    assert_eq!(ticks(&kinds), vec![0]);
    assert_eq!(finishes(&kinds), 1);
}

#[test]
fn test_start_after_finish_restarts_full_time() {
    let (mut countdown, clock, _) = make(manual(1_000));
    countdown.start();
    clock.advance(1_000);
    countdown.advance(clock.now_ms());
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.state(), CountdownState::Finished);

    countdown.start();
    assert_eq!(countdown.remain(), 1_000);
    assert_eq!(countdown.end_time(), Some(clock.now_ms() + 1_000));
}

#[test]
fn test_paused_countdown_ignores_frames() {
    let (mut countdown, clock, mut rx) = make(manual(5_000));
    drain(&mut rx);

    clock.advance(2_000);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 5_000);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_second_resolution_ticks_once_per_boundary() {
    let (mut countdown, clock, mut rx) = make(manual(3_000));
    countdown.start();
    drain(&mut rx);

    // ~60 FPS across the full duration
    let mut renders = 0;
    for _ in 0..200 {
        clock.advance(16);
        countdown.advance(clock.now_ms());
        renders += 1;
        if countdown.state() == CountdownState::Finished {
            break;
        }
    }

    let kinds = drain(&mut rx);
    let seen = ticks(&kinds);
    // 2xxx, 1xxx, 0xxx, then exactly 0
    let seconds: Vec<u64> = seen.iter().map(|ms| ms / 1000).collect();
    assert_eq!(seconds, vec![2, 1, 0, 0], "ticks: {seen:?}");
    assert_eq!(seen.last(), Some(&0));
    assert_eq!(finishes(&kinds), 1);
    // Every frame while playing requests a render
    let render_count = kinds.iter().filter(|k| **k == EventKind::Render).count();
    assert_eq!(render_count, renders);
}

#[test]
fn test_second_resolution_holds_remain_within_second() {
    let (mut countdown, clock, _) = make(manual(5_000));
    countdown.start();

    clock.advance(100);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 4_900);

    clock.advance(100);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 4_900, "same second, no update");
}

#[test]
fn test_millisecond_mode_ticks_every_frame() {
    let (mut countdown, clock, mut rx) = make(manual(1_000).millisecond(true));
    countdown.start();
    drain(&mut rx);

    for _ in 0..5 {
        clock.advance(16);
        countdown.advance(clock.now_ms());
    }

    let kinds = drain(&mut rx);
    assert_eq!(ticks(&kinds), vec![984, 968, 952, 936, 920]);
    assert_eq!(countdown.remain(), 920);
}

#[test]
fn test_zero_duration_finishes_on_first_frame() {
    let (mut countdown, clock, mut rx) = make(CountdownConfig::with_time(0));
    drain(&mut rx);

    countdown.advance(clock.now_ms());
    assert_eq!(countdown.state(), CountdownState::Finished);
    assert_eq!(finishes(&drain(&mut rx)), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Snapshot
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_data_rounds_up_while_playing_without_millis() {
    let (mut countdown, clock, _) = make(manual(5_000));
    assert_eq!(countdown.data().formatted_time, "00:00:05");

    countdown.start();
    assert_eq!(countdown.data().formatted_time, "00:00:05");

    clock.advance(300);
    countdown.advance(clock.now_ms());
    let data = countdown.data();
    assert_eq!(data.formatted_time, "00:00:05");
    assert_eq!(data.remain, 4_700);

    // Paused shows the raw value
    countdown.pause();
    assert_eq!(countdown.data().formatted_time, "00:00:04");
}

#[test]
fn test_data_with_millis_is_exact() {
    let (mut countdown, clock, _) = make(manual(90_061_234).format("HH:mm:ss:SSS").millisecond(true));
    let data = countdown.data();
    assert_eq!(data.formatted_time, "25:01:01:234");
    assert_eq!(data.fragments, vec!["25", "01", "01", "234"]);

    countdown.start();
    clock.advance(234);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.data().formatted_time, "25:01:01:000");
}

#[test]
fn test_data_exact_second_is_not_rounded_up() {
    let (mut countdown, clock, _) = make(manual(5_000));
    countdown.start();

    clock.advance(1_000);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 4_000);
    assert_eq!(countdown.data().formatted_time, "00:00:04");

    clock.advance(1);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 3_999);
    assert_eq!(countdown.data().formatted_time, "00:00:04");
}

#[test]
fn test_data_millisecond_mode_without_millis_token() {
    let (mut countdown, clock, _) = make(manual(5_000).millisecond(true));
    countdown.start();

    clock.advance(1_000);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.data().formatted_time, "00:00:04");

    clock.advance(500);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 3_500);
    assert_eq!(countdown.data().formatted_time, "00:00:04");

    // Zero while still playing reads zero, not one second
    clock.advance(3_500);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.state(), CountdownState::Playing);
    assert_eq!(countdown.data().formatted_time, "00:00:00");

    countdown.advance(clock.now_ms());
    assert_eq!(countdown.state(), CountdownState::Finished);
    assert_eq!(countdown.data().formatted_time, "00:00:00");
}

#[test]
fn test_set_format_requests_render() {
    let (mut countdown, _, mut rx) = make(manual(61_000));
    drain(&mut rx);

    countdown.set_format("mm:ss");
    assert_eq!(drain(&mut rx), vec![EventKind::Render]);
    assert_eq!(countdown.data().fragments, vec!["01", "01"]);
}

#[test]
fn test_dropped_receiver_detaches_silently() {
    let (mut countdown, clock, rx) = make(CountdownConfig::with_time(2_000));
    drop(rx);

    clock.advance(1_500);
    countdown.advance(clock.now_ms());
    assert_eq!(countdown.remain(), 500);
}

#[test]
fn test_ids_are_unique() {
    let (a, _, _) = make(manual(1));
    let (b, _, _) = make(manual(1));
    assert_ne!(a.id(), b.id());
}
