//! Tests for settings persistence and fallback loading.

use gesture_tree::settings::{PlacementSettings, RotationSettings, Settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        placement: PlacementSettings {
            tree_height: 12.0,
            ..PlacementSettings::default()
        },
        rotation: RotationSettings {
            hand_gain: 0.1,
            pointer_gain: 0.01,
        },
        animation_speed: 0.2,
    };
    settings.save_to(&path).unwrap();

    assert!(path.exists());
    assert_eq!(Settings::try_load_from(&path).unwrap(), settings);
    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    assert_eq!(Settings::load_from(&path), Settings::default());
    assert!(Settings::try_load_from(&path).is_err());
}

#[test]
fn test_invalid_json_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(Settings::try_load_from(&path).is_err());
    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_loaded_values_are_sanitized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{"placement": {"scatter_radius": 0.0}, "animation_speed": 5.0}"#,
    )
    .unwrap();

    let settings = Settings::load_from(&path);
    assert_eq!(settings.placement.scatter_radius, PlacementSettings::default().scatter_radius);
    assert_eq!(settings.animation_speed, 1.0);
}
