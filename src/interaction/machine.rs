//! The interaction state machine - single owner of mode, selection, rotation
//! and the photo collection.
//!
//! Every input flows through [`InteractionMachine::dispatch`]:
//!
//! ```text
//! InputEvent -> InputArbiter (authority) -> transition rules -> state
//! ```
//!
//! A gesture sample is one logical step: its discrete kind is applied, and its
//! horizontal position rotates the field if the step began in `Scattered`.

use super::snapshot::{OverlayStatus, SceneSnapshot};
use super::state::InteractionState;
use crate::input::{
    Clock, InputArbiter, InputEvent, InputKind, MonotonicClock, PointerAction, Verdict,
    translate_pointer,
};
use crate::placement::PlacementGenerator;
use crate::profile_scope;
use crate::settings::{RotationSettings, Settings};
use crate::types::{
    GestureSample, ImageRef, Mode, PhotoArtifact, PhotoId, PointerEvent, normalize_coord,
};
use rand::Rng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Result of dispatching one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed
    Applied,
    /// Input matched no transition; state unchanged
    Ignored,
    /// Pointer input inside the quiet window; state unchanged
    Suppressed,
    /// A new photo was admitted
    PhotoAdded(PhotoId),
}

impl Outcome {
    pub fn changed_state(self) -> bool {
        matches!(self, Outcome::Applied | Outcome::PhotoAdded(_))
    }
}

pub struct InteractionMachine<R: Rng = StdRng> {
    state: InteractionState,
    /// Creation order; append-only
    photos: Arc<Vec<PhotoArtifact>>,
    arbiter: InputArbiter,
    placement: PlacementGenerator<R>,
    rotation: RotationSettings,
    animation_speed: f32,
    clock: Arc<dyn Clock>,
}

impl InteractionMachine<StdRng> {
    /// Machine with entropy-seeded placement and the real monotonic clock.
    pub fn new(settings: Settings) -> Self {
        let generator = PlacementGenerator::from_entropy(settings.placement);
        Self::with_generator(settings, generator)
    }

    /// Machine with a deterministic placement generator.
    pub fn seeded(settings: Settings, seed: u64) -> Self {
        let generator = PlacementGenerator::seeded(seed, settings.placement);
        Self::with_generator(settings, generator)
    }
}

impl Default for InteractionMachine<StdRng> {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl<R: Rng> InteractionMachine<R> {
    /// Machine using a caller-supplied generator. The generator's geometry
    /// is replaced by `settings.placement`.
    pub fn with_generator(settings: Settings, mut placement: PlacementGenerator<R>) -> Self {
        let settings = settings.sanitized();
        placement.set_settings(settings.placement);
        Self {
            state: InteractionState::default(),
            photos: Arc::new(Vec::new()),
            arbiter: InputArbiter::new(),
            placement,
            rotation: settings.rotation,
            animation_speed: settings.animation_speed,
            clock: Arc::new(MonotonicClock),
        }
    }

    /// Replace the clock used to stamp `on_*` inputs.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    // ========================================================================
    // Read-only state
    // ========================================================================

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn selected_photo(&self) -> Option<PhotoId> {
        self.state.selected_photo()
    }

    pub fn rotation_offset(&self) -> f64 {
        self.state.rotation_offset()
    }

    /// Photos in creation order.
    pub fn photos(&self) -> &[PhotoArtifact] {
        &self.photos
    }

    pub fn photo(&self, id: PhotoId) -> Option<&PhotoArtifact> {
        self.photos.iter().find(|p| p.id == id)
    }

    /// Arrival time of the last accepted gesture sample.
    pub fn last_gesture_at(&self) -> Option<Instant> {
        self.arbiter.last_gesture_at()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.state, &self.photos, self.animation_speed)
    }

    pub fn overlay_status(&self) -> OverlayStatus {
        OverlayStatus::new(self.state.mode(), self.state.current_gesture(), self.photos.len())
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // ========================================================================
    // Collaborator entry points (stamped with the machine's clock)
    // ========================================================================

    /// Hand-tracking sample. Always authoritative.
    pub fn on_gesture_sample(&mut self, sample: GestureSample) -> Outcome {
        let now = self.clock.now();
        self.dispatch(InputEvent::gesture(now, sample))
    }

    pub fn on_pointer_down(&mut self) -> Outcome {
        let now = self.clock.now();
        self.dispatch(InputEvent::pointer(now, PointerEvent::down()))
    }

    pub fn on_pointer_up(&mut self) -> Outcome {
        let now = self.clock.now();
        self.dispatch(InputEvent::pointer(now, PointerEvent::up()))
    }

    pub fn on_pointer_move(&mut self, normalized_x: f32) -> Outcome {
        let now = self.clock.now();
        self.dispatch(InputEvent::pointer(now, PointerEvent::moved(normalized_x)))
    }

    /// Place a new photo and append it. Never changes mode or selection.
    pub fn on_image_submitted(&mut self, image: impl Into<ImageRef>) -> PhotoId {
        self.admit_photo(image.into())
    }

    /// Explicit selection from the renderer. Unknown ids are ignored.
    pub fn on_photo_picked(&mut self, id: PhotoId) -> Outcome {
        let now = self.clock.now();
        self.dispatch(InputEvent::new(now, InputKind::PhotoPicked(id)))
    }

    /// Replace geometry and gains for subsequent inputs. Existing photos keep
    /// their positions. Out-of-range values fall back to defaults.
    pub fn apply_settings(&mut self, settings: Settings) {
        let settings = settings.sanitized();
        info!(?settings, "Applying settings");
        self.placement.set_settings(settings.placement);
        self.rotation = settings.rotation;
        self.animation_speed = settings.animation_speed;
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Apply one arrival-stamped input.
    pub fn dispatch(&mut self, event: InputEvent) -> Outcome {
        profile_scope!("dispatch");

        if self.arbiter.arbitrate(&event) == Verdict::Suppressed {
            return Outcome::Suppressed;
        }

        let outcome = match event.kind {
            InputKind::Gesture(sample) => self.apply_sample(sample.normalized(), self.rotation.hand_gain),
            InputKind::Pointer(pointer) => match translate_pointer(pointer) {
                PointerAction::Gesture(sample) => self.apply_sample(sample, self.rotation.pointer_gain),
                PointerAction::Rotate { normalized_x } => {
                    self.apply_rotation(normalize_coord(normalized_x), self.rotation.pointer_gain)
                }
            },
            InputKind::ImageSubmitted(image) => Outcome::PhotoAdded(self.admit_photo(image)),
            InputKind::PhotoPicked(id) => self.apply_pick(id),
        };

        debug_assert!(self.state.is_consistent());
        outcome
    }

    fn apply_sample(&mut self, sample: GestureSample, gain: f32) -> Outcome {
        let from = self.state.mode();
        let was_scattered = self.state.is_scattered();
        let first_photo = self.photos.first().map(|p| p.id);

        let gesture_changed = self.state.set_current_gesture(sample.kind);
        let transitioned = self.state.apply_gesture(sample.kind, first_photo);
        if transitioned {
            debug!(
                gesture = ?sample.kind,
                from = ?from,
                to = ?self.state.mode(),
                selected = ?self.state.selected_photo(),
                "Mode transition"
            );
        }

        // Rotation follows the mode the step started in.
        let rotated = was_scattered && self.state.accumulate_rotation(sample.normalized_x, gain);

        if transitioned || rotated || gesture_changed {
            Outcome::Applied
        } else {
            trace!(gesture = ?sample.kind, mode = ?from, "Sample matched no transition");
            Outcome::Ignored
        }
    }

    fn apply_rotation(&mut self, normalized_x: f32, gain: f32) -> Outcome {
        if self.state.rotate(normalized_x, gain) {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }

    fn apply_pick(&mut self, id: PhotoId) -> Outcome {
        if self.photo(id).is_none() {
            debug!(%id, "Ignoring pick of unknown photo");
            return Outcome::Ignored;
        }
        let from = self.state.mode();
        if self.state.pick(id) {
            debug!(from = ?from, selected = %id, "Photo picked");
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }

    fn admit_photo(&mut self, image: ImageRef) -> PhotoId {
        let photo = self.placement.generate(image);
        let id = photo.id;
        info!(
            %id,
            image = photo.image.as_str(),
            y = photo.rest_position.y,
            "Photo admitted"
        );
        Arc::make_mut(&mut self.photos).push(photo);
        id
    }
}
