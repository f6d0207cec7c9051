//! User settings - tree geometry, rotation gains and animation speed.
//!
//! Settings live in `<config dir>/gesture-tree/settings.json`. Loading never
//! fails the application: a missing file yields defaults, and an unreadable or
//! invalid file is logged and replaced by defaults.
//!
//! The pointer quiet window is not configurable; it is a constant
//! (see [`crate::constants::QUIET_WINDOW_MS`]).

use crate::constants::{
    ANIMATION_SPEED, CONFIG_DIR_NAME, HAND_ROTATION_GAIN, POINTER_ROTATION_GAIN, SCATTER_RADIUS,
    SETTINGS_FILE_NAME, SURFACE_OFFSET, TREE_HEIGHT, TREE_RADIUS_BASE,
};
use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Path of the settings file in the platform config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Geometry used by the placement generator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Height H of the tree cone
    pub tree_height: f32,
    /// Cone radius at the base
    pub base_radius: f32,
    /// Lift off the cone surface so photos render in front of it
    pub surface_offset: f32,
    /// Half-extent R of the scatter cube
    pub scatter_radius: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            tree_height: TREE_HEIGHT,
            base_radius: TREE_RADIUS_BASE,
            surface_offset: SURFACE_OFFSET,
            scatter_radius: SCATTER_RADIUS,
        }
    }
}

/// Rotation gains per input source.
///
/// The hand gain is larger to compensate for the wider natural range of hand
/// motion compared with a mouse drag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationSettings {
    pub hand_gain: f32,
    pub pointer_gain: f32,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            hand_gain: HAND_ROTATION_GAIN,
            pointer_gain: POINTER_ROTATION_GAIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub placement: PlacementSettings,
    pub rotation: RotationSettings,
    /// Per-frame interpolation factor for displayed positions
    pub animation_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            placement: PlacementSettings::default(),
            rotation: RotationSettings::default(),
            animation_speed: ANIMATION_SPEED,
        }
    }
}

fn positive_or(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!(field = name, value, fallback, "Invalid setting, using default");
        fallback
    }
}

fn non_negative_or(value: f32, fallback: f32, name: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(field = name, value, fallback, "Invalid setting, using default");
        fallback
    }
}

impl Settings {
    /// Load from the default path, falling back to defaults on any problem.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory, using default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults on any problem.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), "Failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    /// Fallible load; the result is sanitized.
    pub fn try_load_from(path: &Path) -> SettingsResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Save to the default path.
    pub fn save(&self) -> SettingsResult<()> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Replace out-of-range values with their defaults.
    pub fn sanitized(self) -> Self {
        let d = Settings::default();
        Self {
            placement: PlacementSettings {
                tree_height: positive_or(
                    self.placement.tree_height,
                    d.placement.tree_height,
                    "placement.tree_height",
                ),
                base_radius: positive_or(
                    self.placement.base_radius,
                    d.placement.base_radius,
                    "placement.base_radius",
                ),
                surface_offset: non_negative_or(
                    self.placement.surface_offset,
                    d.placement.surface_offset,
                    "placement.surface_offset",
                ),
                scatter_radius: positive_or(
                    self.placement.scatter_radius,
                    d.placement.scatter_radius,
                    "placement.scatter_radius",
                ),
            },
            rotation: RotationSettings {
                hand_gain: non_negative_or(
                    self.rotation.hand_gain,
                    d.rotation.hand_gain,
                    "rotation.hand_gain",
                ),
                pointer_gain: non_negative_or(
                    self.rotation.pointer_gain,
                    d.rotation.pointer_gain,
                    "rotation.pointer_gain",
                ),
            },
            animation_speed: positive_or(self.animation_speed, d.animation_speed, "animation_speed")
                .min(1.0),
        }
    }
}
