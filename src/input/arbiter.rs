//! Input arbitration - decides which source is authoritative.
//!
//! Hands take precedence whenever present; the pointer is a pure fallback.
//!
//! ```text
//! gesture sample  -> always accepted, re-arms the quiet window
//! pointer event   -> accepted only if (now - last gesture) > QUIET_WINDOW_MS
//!                    (or no gesture sample was ever seen)
//! ```

use super::event::{InputEvent, InputSource};
use crate::constants::{NEUTRAL_X, QUIET_WINDOW_MS};
use crate::types::{GestureKind, GestureSample, PointerEvent, PointerKind};
use std::time::{Duration, Instant};
use tracing::trace;

pub const QUIET_WINDOW: Duration = Duration::from_millis(QUIET_WINDOW_MS);

/// Outcome of arbitrating one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// Pointer input inside the quiet window
    Suppressed,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// What an accepted pointer event means to the state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    /// Down/Up are expressed in the gesture vocabulary
    Gesture(GestureSample),
    /// Move nudges rotation directly
    Rotate { normalized_x: f32 },
}

/// Map a pointer event onto the gesture vocabulary.
///
/// Down is a fist, Up an open palm, both at the neutral horizontal position
/// so they contribute no rotation.
pub fn translate_pointer(event: PointerEvent) -> PointerAction {
    match event.kind {
        PointerKind::Down => PointerAction::Gesture(GestureSample::new(GestureKind::Close, NEUTRAL_X)),
        PointerKind::Up => PointerAction::Gesture(GestureSample::new(GestureKind::Open, NEUTRAL_X)),
        PointerKind::Move => PointerAction::Rotate {
            normalized_x: event.normalized_x,
        },
    }
}

/// Tracks the last accepted gesture sample and gates pointer input.
#[derive(Debug, Clone, Default)]
pub struct InputArbiter {
    last_gesture_at: Option<Instant>,
}

impl InputArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_gesture_at(&self) -> Option<Instant> {
        self.last_gesture_at
    }

    /// True if pointer input arriving at `now` should be applied.
    pub fn pointer_is_authoritative(&self, now: Instant) -> bool {
        match self.last_gesture_at {
            None => true,
            Some(last) => now.saturating_duration_since(last) > QUIET_WINDOW,
        }
    }

    /// Arbitrate one event, recording gesture arrivals.
    pub fn arbitrate(&mut self, event: &InputEvent) -> Verdict {
        match event.source() {
            InputSource::Hand => {
                self.last_gesture_at = Some(event.at);
                Verdict::Accepted
            }
            InputSource::Pointer => {
                if self.pointer_is_authoritative(event.at) {
                    trace!(input = event.kind.name(), "Pointer input accepted");
                    Verdict::Accepted
                } else {
                    trace!(
                        input = event.kind.name(),
                        since_gesture_ms = self
                            .last_gesture_at
                            .map(|last| event.at.saturating_duration_since(last).as_millis() as u64),
                        "Pointer input suppressed by hand tracking"
                    );
                    Verdict::Suppressed
                }
            }
            InputSource::Direct => Verdict::Accepted,
        }
    }
}
