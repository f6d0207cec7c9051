//! Tests for pointer/gesture arbitration and the quiet window.

use gesture_tree::input::{InputArbiter, InputEvent, InputKind, PointerAction, Verdict, translate_pointer};
use gesture_tree::types::{GestureKind, GestureSample, PhotoId, PointerEvent};
use std::time::{Duration, Instant};
use uuid::Uuid;

fn at(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

#[test]
fn test_pointer_authoritative_before_any_gesture() {
    let arbiter = InputArbiter::new();
    assert!(arbiter.last_gesture_at().is_none());
    assert!(arbiter.pointer_is_authoritative(Instant::now()));
}

#[test]
fn test_gesture_always_accepted_and_recorded() {
    let mut arbiter = InputArbiter::new();
    let t0 = Instant::now();

    let verdict = arbiter.arbitrate(&InputEvent::gesture(t0, GestureSample::new(GestureKind::None, 0.5)));

    assert_eq!(verdict, Verdict::Accepted);
    assert_eq!(arbiter.last_gesture_at(), Some(t0));
}

#[test]
fn test_quiet_window_boundary_is_exclusive() {
    let mut arbiter = InputArbiter::new();
    let t0 = Instant::now();
    arbiter.arbitrate(&InputEvent::gesture(t0, GestureSample::new(GestureKind::Open, 0.5)));

    let inside = InputEvent::pointer(at(t0, 999), PointerEvent::up());
    let boundary = InputEvent::pointer(at(t0, 1000), PointerEvent::up());
    let after = InputEvent::pointer(at(t0, 1001), PointerEvent::up());

    assert_eq!(arbiter.arbitrate(&inside), Verdict::Suppressed);
    assert_eq!(arbiter.arbitrate(&boundary), Verdict::Suppressed);
    assert_eq!(arbiter.arbitrate(&after), Verdict::Accepted);
}

#[test]
fn test_each_gesture_rearms_window() {
    let mut arbiter = InputArbiter::new();
    let t0 = Instant::now();
    arbiter.arbitrate(&InputEvent::gesture(t0, GestureSample::new(GestureKind::None, 0.5)));
    arbiter.arbitrate(&InputEvent::gesture(at(t0, 900), GestureSample::new(GestureKind::None, 0.5)));

    let move_event = InputEvent::pointer(at(t0, 1500), PointerEvent::moved(0.8));
    assert!(!arbiter.arbitrate(&move_event).is_accepted());
    assert!(arbiter.pointer_is_authoritative(at(t0, 1901)));
}

#[test]
fn test_direct_inputs_never_gated() {
    let mut arbiter = InputArbiter::new();
    let t0 = Instant::now();
    arbiter.arbitrate(&InputEvent::gesture(t0, GestureSample::new(GestureKind::Open, 0.5)));

    let pick = InputEvent::new(at(t0, 10), InputKind::PhotoPicked(PhotoId::from_uuid(Uuid::nil())));
    let image = InputEvent::new(at(t0, 20), InputKind::ImageSubmitted("a.jpg".into()));

    assert_eq!(arbiter.arbitrate(&pick), Verdict::Accepted);
    assert_eq!(arbiter.arbitrate(&image), Verdict::Accepted);
    // Direct inputs do not re-arm the window.
    assert_eq!(arbiter.last_gesture_at(), Some(t0));
}

#[test]
fn test_pointer_translation() {
    assert_eq!(
        translate_pointer(PointerEvent::down()),
        PointerAction::Gesture(GestureSample::new(GestureKind::Close, 0.5))
    );
    assert_eq!(
        translate_pointer(PointerEvent::up()),
        PointerAction::Gesture(GestureSample::new(GestureKind::Open, 0.5))
    );
    assert_eq!(
        translate_pointer(PointerEvent::moved(0.3)),
        PointerAction::Rotate { normalized_x: 0.3 }
    );
}
