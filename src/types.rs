//! Core types for the gesture tree.
//!
//! This module defines the value types shared by the placement generator, the
//! input arbitration layer and the interaction state machine: modes, gesture
//! and pointer vocabularies, and the photo artifacts placed around the tree.

use crate::constants::NEUTRAL_X;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Geometry
// ============================================================================

/// A point or Euler rotation in scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance from the vertical (y) axis.
    #[inline]
    pub fn horizontal_distance(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Move a fraction `speed` of the way toward `target`.
    ///
    /// The renderer calls this once per frame to ease displayed positions
    /// toward the current mode's target.
    #[inline]
    pub fn approach(self, target: Vec3, speed: f32) -> Vec3 {
        Vec3::new(
            self.x + (target.x - self.x) * speed,
            self.y + (target.y - self.y) * speed,
            self.z + (target.z - self.z) * speed,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

// ============================================================================
// Mode
// ============================================================================

/// The discrete visual/interaction phase. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Tree assembled
    #[default]
    Formed,
    /// Photos dispersed, field rotating
    Scattered,
    /// One photo focused
    Viewing,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Formed => "Tree",
            Mode::Scattered => "Scattered",
            Mode::Viewing => "Viewing Photo",
        }
    }

    /// Short usage hint shown by the overlay for this mode.
    pub fn hint(&self) -> &'static str {
        match self {
            Mode::Formed => "Open your hand (or release the mouse) to scatter",
            Mode::Scattered => "Move left/right to rotate, grab to view a photo, fist to close",
            Mode::Viewing => "Open your hand to return, fist to close the tree",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Gesture Input
// ============================================================================

/// Classified hand pose, as delivered by the tracking collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    #[default]
    None,
    /// Fist - gather the tree
    Close,
    /// Open palm - scatter
    Open,
    /// Grab - view a photo
    Grab,
}

impl GestureKind {
    /// Parse a gesture label leniently. Unrecognized labels map to `None`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "CLOSE" | "FIST" => GestureKind::Close,
            "OPEN" | "OPEN_PALM" | "PALM" => GestureKind::Open,
            "GRAB" => GestureKind::Grab,
            _ => GestureKind::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GestureKind::None => "None",
            GestureKind::Close => "Fist",
            GestureKind::Open => "Open Palm",
            GestureKind::Grab => "Grab",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalize a screen-relative coordinate into [0, 1].
///
/// Non-finite values collapse to the neutral position.
#[inline]
pub fn normalize_coord(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        NEUTRAL_X
    }
}

/// One classified sample from the hand-tracking collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub kind: GestureKind,
    /// Horizontal hand position, 0 = left edge, 1 = right edge
    pub normalized_x: f32,
    /// Vertical hand position, 0 = top, 1 = bottom
    pub normalized_y: f32,
    /// Thumb-to-index distance reported by the classifier
    pub pinch_distance: f32,
    /// Palm roll reported by the classifier
    pub rotation_hint: f32,
}

impl GestureSample {
    /// A sample of `kind` at horizontal position `x`, other fields neutral.
    pub fn new(kind: GestureKind, normalized_x: f32) -> Self {
        Self {
            kind,
            normalized_x,
            normalized_y: NEUTRAL_X,
            pinch_distance: 0.0,
            rotation_hint: 0.0,
        }
    }

    /// Copy with coordinates clamped to [0, 1].
    pub fn normalized(mut self) -> Self {
        self.normalized_x = normalize_coord(self.normalized_x);
        self.normalized_y = normalize_coord(self.normalized_y);
        self
    }
}

// ============================================================================
// Pointer Input
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Up,
    Move,
}

/// A native pointer event. Only the horizontal position is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub normalized_x: f32,
}

impl PointerEvent {
    pub fn down() -> Self {
        Self { kind: PointerKind::Down, normalized_x: NEUTRAL_X }
    }

    pub fn up() -> Self {
        Self { kind: PointerKind::Up, normalized_x: NEUTRAL_X }
    }

    pub fn moved(normalized_x: f32) -> Self {
        Self { kind: PointerKind::Move, normalized_x }
    }
}

// ============================================================================
// Photos
// ============================================================================

/// Opaque identity of a photo artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(Uuid);

impl PhotoId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque handle to an image, owned by the upload collaborator (usually a URL).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A user-supplied photo placed around the tree.
///
/// Positions are fixed at creation. The renderer interpolates the displayed
/// position toward [`PhotoArtifact::target_position`] for the current mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoArtifact {
    pub id: PhotoId,
    pub image: ImageRef,
    /// Position on the cone surface when the tree is formed
    pub rest_position: Vec3,
    /// Position in the scattered cloud
    pub scatter_position: Vec3,
    /// Euler rotation facing outward along the azimuth
    pub orientation: Vec3,
}

impl PhotoArtifact {
    pub fn target_position(&self, mode: Mode) -> Vec3 {
        match mode {
            Mode::Formed => self.rest_position,
            Mode::Scattered | Mode::Viewing => self.scatter_position,
        }
    }
}
