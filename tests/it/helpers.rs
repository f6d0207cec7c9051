//! Test helpers and builders for reducing boilerplate in tests.
//!
//! - `TestMachineBuilder` - Builder for machines with photos, a mode and a manual clock
//! - `sample()` / `hand()` - Gesture sample shorthands
//! - `assert_close()` - Float comparison with tolerance

#![allow(dead_code)]

use gesture_tree::input::ManualClock;
use gesture_tree::settings::Settings;
use gesture_tree::types::{GestureKind, GestureSample, Mode, PhotoId};
use gesture_tree::InteractionMachine;

pub const EPSILON: f64 = 1e-5;

/// Builder for test machines.
///
/// # Example
/// ```ignore
/// let (machine, clock) = TestMachineBuilder::new()
///     .with_photos(2)
///     .in_mode(Mode::Scattered)
///     .build();
/// ```
pub struct TestMachineBuilder {
    settings: Settings,
    seed: u64,
    photos: usize,
    mode: Mode,
}

impl Default for TestMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMachineBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            seed: 42,
            photos: 0,
            mode: Mode::Formed,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Submit `count` images named `photo-0`, `photo-1`, ...
    pub fn with_photos(mut self, count: usize) -> Self {
        self.photos = count;
        self
    }

    /// Drive the machine into `mode` with pointer input (no gesture samples),
    /// so the quiet window is not armed. `Viewing` picks the first photo.
    pub fn in_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> (InteractionMachine, ManualClock) {
        let clock = ManualClock::new();
        let mut machine =
            InteractionMachine::seeded(self.settings, self.seed).with_clock(clock.clone());

        for i in 0..self.photos {
            machine.on_image_submitted(format!("photo-{i}"));
        }

        match self.mode {
            Mode::Formed => {}
            Mode::Scattered => {
                machine.on_pointer_up();
            }
            Mode::Viewing => {
                let first = machine
                    .photos()
                    .first()
                    .map(|p| p.id)
                    .expect("Viewing requires at least one photo");
                machine.on_photo_picked(first);
            }
        }
        assert_eq!(machine.mode(), self.mode);

        (machine, clock)
    }
}

/// Gesture sample of `kind` at horizontal position `x`.
pub fn sample(kind: GestureKind, x: f32) -> GestureSample {
    GestureSample::new(kind, x)
}

/// Neutral-position gesture sample.
pub fn hand(kind: GestureKind) -> GestureSample {
    GestureSample::new(kind, 0.5)
}

pub fn photo_ids(machine: &InteractionMachine) -> Vec<PhotoId> {
    machine.photos().iter().map(|p| p.id).collect()
}

#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
