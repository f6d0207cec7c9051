//! Tests for the threaded interaction runtime.

use crate::helpers::{assert_close, hand, sample};
use gesture_tree::input::{Clock, InputEvent, InputKind, ManualClock};
use gesture_tree::settings::{RotationSettings, Settings};
use gesture_tree::types::{GestureKind, Mode, PointerEvent};
use gesture_tree::{InteractionMachine, InteractionRuntime, RuntimeError, SceneSnapshot};
use rand::rngs::StdRng;
use std::thread;
use std::time::{Duration, Instant};

fn spawn() -> (InteractionRuntime<StdRng>, ManualClock) {
    let clock = ManualClock::new();
    let machine = InteractionMachine::seeded(Settings::default(), 21);
    let runtime = InteractionRuntime::spawn_with_clock(machine, clock.clone()).unwrap();
    (runtime, clock)
}

/// Poll the published snapshot until `done` holds or a timeout elapses.
fn wait_for(runtime: &InteractionRuntime<StdRng>, done: impl Fn(&SceneSnapshot) -> bool) -> SceneSnapshot {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let snapshot = runtime.snapshot();
        if done(&snapshot) || Instant::now() > deadline {
            return snapshot;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_inputs_applied_in_arrival_order() {
    let (runtime, clock) = spawn();
    let handle = runtime.handle();

    handle.on_image_submitted("a.jpg").unwrap();
    handle.on_image_submitted("b.jpg").unwrap();
    handle.on_gesture_sample(hand(GestureKind::Open)).unwrap();
    clock.advance_ms(30);
    handle.on_gesture_sample(hand(GestureKind::Grab)).unwrap();

    let (machine, stats) = runtime.shutdown().unwrap();
    assert_eq!(machine.mode(), Mode::Viewing);
    assert_eq!(machine.selected_photo(), Some(machine.photos()[0].id));
    assert_eq!(machine.photos()[0].image.as_str(), "a.jpg");
    assert_eq!(stats.total_dispatched(), 4);
    assert_eq!(stats.get("image_submitted").map(|s| s.count()), Some(2));
}

#[test]
fn test_snapshot_published_after_change() {
    let (runtime, _clock) = spawn();
    assert_eq!(runtime.snapshot().mode, Mode::Formed);

    let handle = runtime.handle();
    handle.on_gesture_sample(hand(GestureKind::Open)).unwrap();
    handle.on_gesture_sample(sample(GestureKind::Open, 1.0)).unwrap();

    let snapshot = wait_for(&runtime, |s| s.rotation_offset > 0.0);
    assert_eq!(snapshot.mode, Mode::Scattered);
    assert_close(snapshot.rotation_offset, 0.05);
    runtime.shutdown().unwrap();
}

#[test]
fn test_handle_stamps_with_clock_for_arbitration() {
    let (runtime, clock) = spawn();
    let handle = runtime.handle();

    handle.on_gesture_sample(hand(GestureKind::Open)).unwrap();
    clock.advance_ms(400);
    handle.on_pointer_down().unwrap();
    clock.advance_ms(700);
    handle.send_input(InputKind::Pointer(PointerEvent::moved(1.0))).unwrap();

    let (machine, _stats) = runtime.shutdown().unwrap();
    // Down was suppressed; the move arrived 1100 ms after the sample.
    assert_eq!(machine.mode(), Mode::Scattered);
    assert_close(machine.rotation_offset(), 0.02);
}

#[test]
fn test_apply_settings_through_handle() {
    let (runtime, _clock) = spawn();
    let handle = runtime.handle();

    let settings = Settings {
        rotation: RotationSettings {
            hand_gain: 0.5,
            pointer_gain: 0.1,
        },
        animation_speed: 0.3,
        ..Settings::default()
    };
    handle.apply_settings(settings).unwrap();
    handle.on_gesture_sample(hand(GestureKind::Open)).unwrap();
    handle.on_gesture_sample(sample(GestureKind::Open, 1.0)).unwrap();

    let (machine, _stats) = runtime.shutdown().unwrap();
    assert_close(machine.rotation_offset(), 0.5);
    assert!((machine.snapshot().animation_speed - 0.3).abs() < 1e-6);
}

#[test]
fn test_handles_from_multiple_threads() {
    let (runtime, _clock) = spawn();

    let producers: Vec<_> = (0..4)
        .map(|t| {
            let handle = runtime.handle();
            thread::spawn(move || {
                for i in 0..5 {
                    handle.on_image_submitted(format!("{t}-{i}.jpg")).unwrap();
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    let (machine, _stats) = runtime.shutdown().unwrap();
    assert_eq!(machine.photos().len(), 20);
    assert_eq!(machine.mode(), Mode::Formed);
}

#[test]
fn test_send_after_shutdown_is_disconnected() {
    let (runtime, _clock) = spawn();
    let handle = runtime.handle();

    runtime.shutdown().unwrap();

    assert_eq!(handle.on_pointer_up(), Err(RuntimeError::Disconnected));
    assert_eq!(handle.snapshot().mode, Mode::Formed);
}

#[test]
fn test_pre_stamped_events_use_capture_time() {
    let (runtime, clock) = spawn();
    let handle = runtime.handle();
    let captured = clock.now();

    handle.on_gesture_sample(hand(GestureKind::Open)).unwrap();
    // Delivered late, but captured at the same instant as the sample.
    clock.advance_ms(1500);
    handle.send_event(InputEvent::pointer(captured, PointerEvent::down())).unwrap();

    let (machine, _stats) = runtime.shutdown().unwrap();
    assert_eq!(machine.mode(), Mode::Scattered);
    assert_eq!(machine.last_gesture_at(), Some(captured));
}
