//! Placement generator - procedural 3D positions for photo artifacts.
//!
//! Each admitted image gets two fixed positions:
//!
//! ```text
//!            apex (y = H/2, r = surface_offset)
//!              /\
//!             /  \      rest: random height y, random azimuth θ,
//!            /    \           on the cone surface r(y)
//!           /      \
//!          /________\
//!     base (y = -H/2, r = base_radius + surface_offset)
//!
//!   scatter: uniform in the cube [-R, R]^3
//! ```
//!
//! The scatter cloud is a cube, independent of the cone geometry.
//!
//! The random source is injectable so tests can seed it.

use crate::settings::PlacementSettings;
use crate::types::{ImageRef, PhotoArtifact, PhotoId, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Radius of the tree cone at height `y`.
///
/// Zero-width at the apex plus `surface_offset`, widest at the base. Heights
/// outside [-H/2, H/2] are clamped first so the result is never negative.
#[inline]
pub fn cone_radius(y: f32, settings: &PlacementSettings) -> f32 {
    let half = settings.tree_height / 2.0;
    let y = y.clamp(-half, half);
    ((half - y) / settings.tree_height) * settings.base_radius + settings.surface_offset
}

/// Generates photo artifacts from a random source.
pub struct PlacementGenerator<R: Rng = StdRng> {
    rng: R,
    settings: PlacementSettings,
}

impl PlacementGenerator<StdRng> {
    /// Generator seeded from OS entropy.
    pub fn from_entropy(settings: PlacementSettings) -> Self {
        Self::with_rng(StdRng::from_entropy(), settings)
    }

    /// Deterministic generator for reproducible layouts.
    pub fn seeded(seed: u64, settings: PlacementSettings) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), settings)
    }
}

impl<R: Rng> PlacementGenerator<R> {
    pub fn with_rng(rng: R, settings: PlacementSettings) -> Self {
        Self { rng, settings }
    }

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    /// Replace geometry for subsequently generated photos.
    pub fn set_settings(&mut self, settings: PlacementSettings) {
        self.settings = settings;
    }

    /// Place a new photo. Never fails.
    pub fn generate(&mut self, image: ImageRef) -> PhotoArtifact {
        let id = self.next_id();
        let (rest_position, angle) = self.rest_position();
        let scatter_position = self.scatter_position();

        PhotoArtifact {
            id,
            image,
            rest_position,
            scatter_position,
            orientation: Vec3::new(0.0, angle, 0.0),
        }
    }

    /// Point on the cone surface, with the azimuth it was placed at.
    fn rest_position(&mut self) -> (Vec3, f32) {
        let half = self.settings.tree_height / 2.0;
        let y = self.rng.gen_range(-half..=half);
        let radius = cone_radius(y, &self.settings);
        let angle = self.rng.gen_range(0.0..TAU);

        (Vec3::new(angle.cos() * radius, y, angle.sin() * radius), angle)
    }

    fn scatter_position(&mut self) -> Vec3 {
        let r = self.settings.scatter_radius;
        Vec3::new(
            self.rng.gen_range(-r..=r),
            self.rng.gen_range(-r..=r),
            self.rng.gen_range(-r..=r),
        )
    }

    fn next_id(&mut self) -> PhotoId {
        let bytes: [u8; 16] = self.rng.r#gen();
        PhotoId::from_uuid(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}
