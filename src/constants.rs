//! Application-wide constants.
//!
//! Centralizes tree geometry defaults, input tuning and timing values so the
//! arbitration and placement code stays free of magic numbers.

// ============================================================================
// Tree Geometry
// ============================================================================

/// Default height of the tree cone in scene units
pub const TREE_HEIGHT: f32 = 18.0;

/// Default radius of the cone at its base (y = -H/2)
pub const TREE_RADIUS_BASE: f32 = 7.5;

/// Distance photos float off the idealized cone surface
pub const SURFACE_OFFSET: f32 = 0.5;

/// Half-extent of the scatter cube (photos scatter within [-R, R] per axis)
pub const SCATTER_RADIUS: f32 = 15.0;

// ============================================================================
// Input Tuning
// ============================================================================

/// Rotation gain applied to hand-tracking horizontal updates
pub const HAND_ROTATION_GAIN: f32 = 0.05;

/// Rotation gain applied to pointer-drag horizontal updates
pub const POINTER_ROTATION_GAIN: f32 = 0.02;

/// Neutral horizontal position (no rotation contribution)
pub const NEUTRAL_X: f32 = 0.5;

// ============================================================================
// Timing
// ============================================================================

/// Quiet window after the last gesture sample during which pointer input is
/// suppressed. Fixed; not exposed through settings.
pub const QUIET_WINDOW_MS: u64 = 1000;

/// Per-frame interpolation factor the renderer uses to approach targets
pub const ANIMATION_SPEED: f32 = 0.05;

// ============================================================================
// Settings
// ============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "gesture-tree";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";
