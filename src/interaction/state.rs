//! Interaction state and its transition rules.
//!
//! ## State Transitions
//!
//! ```text
//! Any                -> Formed      (Close; clears selection)
//! Formed | Viewing   -> Scattered   (Open; clears selection)
//! Scattered          -> Viewing     (Grab; selects the first photo, if any
//!                                    photo exists and nothing is selected)
//! Any                -> Viewing     (explicit photo pick)
//! Scattered          -> Scattered   (horizontal update; rotates the field)
//! ```
//!
//! Inputs that match no row leave the state unchanged.
//!
//! Grab intentionally does no spatial hit-testing: gesture pointing is too
//! imprecise, so it enters viewing on the first photo and leaves precise
//! selection to explicit picks.

use crate::constants::NEUTRAL_X;
use crate::types::{GestureKind, Mode, PhotoId};

/// Mode, selection and rotation owned by the state machine.
///
/// Invariants:
/// - `selected_photo.is_some()` iff `mode == Viewing`
/// - `rotation_offset` only changes in a step that began in `Scattered`
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    mode: Mode,
    selected_photo: Option<PhotoId>,
    /// Radians, unbounded
    rotation_offset: f64,
    /// Last gesture applied (from either source), for the overlay
    current_gesture: GestureKind,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: Mode::Formed,
            selected_photo: None,
            rotation_offset: 0.0,
            current_gesture: GestureKind::None,
        }
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected_photo(&self) -> Option<PhotoId> {
        self.selected_photo
    }

    pub fn rotation_offset(&self) -> f64 {
        self.rotation_offset
    }

    pub fn current_gesture(&self) -> GestureKind {
        self.current_gesture
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self.mode, Mode::Viewing)
    }

    pub fn is_scattered(&self) -> bool {
        matches!(self.mode, Mode::Scattered)
    }

    /// True if the selection/mode invariant holds.
    pub fn is_consistent(&self) -> bool {
        self.selected_photo.is_some() == self.is_viewing()
    }

    /// Record the gesture shown to the user. Returns true if it changed.
    pub fn set_current_gesture(&mut self, gesture: GestureKind) -> bool {
        let changed = self.current_gesture != gesture;
        self.current_gesture = gesture;
        changed
    }

    /// Apply a discrete gesture. `first_photo` is the oldest photo in the
    /// collection, if any. Returns true if mode or selection changed.
    pub fn apply_gesture(&mut self, gesture: GestureKind, first_photo: Option<PhotoId>) -> bool {
        let before = (self.mode, self.selected_photo);

        match gesture {
            GestureKind::Close => self.enter(Mode::Formed, None),
            GestureKind::Open => {
                if matches!(self.mode, Mode::Formed | Mode::Viewing) {
                    self.enter(Mode::Scattered, None);
                }
            }
            GestureKind::Grab => {
                if self.is_scattered() && self.selected_photo.is_none() {
                    if let Some(first) = first_photo {
                        self.enter(Mode::Viewing, Some(first));
                    }
                }
            }
            GestureKind::None => {}
        }

        debug_assert!(self.is_consistent());
        before != (self.mode, self.selected_photo)
    }

    /// Focus an explicitly chosen photo, from any mode.
    pub fn pick(&mut self, id: PhotoId) -> bool {
        let changed = !(self.is_viewing() && self.selected_photo == Some(id));
        self.enter(Mode::Viewing, Some(id));
        changed
    }

    /// Rotate the scattered field by `(x - 0.5) * 2 * gain`.
    ///
    /// No-op outside `Scattered`. Returns true if the offset changed.
    pub fn rotate(&mut self, normalized_x: f32, gain: f32) -> bool {
        if !self.is_scattered() {
            return false;
        }
        self.accumulate_rotation(normalized_x, gain)
    }

    /// Add `(x - 0.5) * 2 * gain` without checking the current mode. The
    /// caller decides whether the step began in `Scattered`.
    pub(crate) fn accumulate_rotation(&mut self, normalized_x: f32, gain: f32) -> bool {
        let delta = f64::from(normalized_x - NEUTRAL_X) * 2.0 * f64::from(gain);
        if delta == 0.0 {
            return false;
        }
        self.rotation_offset += delta;
        true
    }

    fn enter(&mut self, mode: Mode, selected: Option<PhotoId>) {
        self.mode = mode;
        self.selected_photo = selected;
    }
}
