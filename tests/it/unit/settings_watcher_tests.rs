//! Tests for the settings file watcher.

use gesture_tree::settings::Settings;
use gesture_tree::settings_watcher::{SettingsEvent, SettingsWatcher, default_settings_path};
use std::fs;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn test_default_settings_path_layout() {
    if let Some(path) = default_settings_path() {
        assert!(path.ends_with("gesture-tree/settings.json"));
    }
}

#[test]
fn test_watcher_starts_quiet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let mut watcher = SettingsWatcher::new(path.clone()).unwrap();
    assert_eq!(watcher.path(), path.as_path());
    assert_eq!(watcher.poll(), None);
}

#[test]
fn test_watcher_fails_for_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("settings.json");

    assert!(SettingsWatcher::new(path).is_err());
}

#[test]
#[ignore = "depends on platform file notification latency"]
fn test_watcher_detects_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    let mut watcher = SettingsWatcher::new(path.clone()).unwrap();

    Settings::default().save_to(&path).unwrap();
    fs::write(dir.path().join("unrelated.txt"), "x").unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut seen = None;
    while Instant::now() < deadline {
        if let Some(event) = watcher.poll() {
            seen = Some(event);
            break;
        }
        thread::sleep(Duration::from_millis(50));
    }
    assert_eq!(seen, Some(SettingsEvent::Changed));
}
