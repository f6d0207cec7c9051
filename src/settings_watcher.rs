//! Settings file watcher for hot reload.
//!
//! Watches the directory containing the settings file and reports changes to
//! that file through a non-blocking [`SettingsWatcher::poll`]. The owner of the
//! interaction machine polls between inputs and applies reloaded settings.

use crate::error::SettingsResult;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

pub use crate::settings::default_settings_path;

/// What happened to the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// File was created or modified; reload it
    Changed,
    /// File was removed; keep current settings
    Deleted,
    /// Watcher reported an error
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    // Dropping the watcher stops event delivery.
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    /// Start watching `path`. The file's parent directory must exist.
    pub fn new(path: PathBuf) -> SettingsResult<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending watcher events, returning the most significant one that
    /// concerns the settings file.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut result = None;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    // Compare by file name; some backends report canonicalized paths.
                    if !event.paths.iter().any(|p| p.file_name() == self.path.file_name()) {
                        continue;
                    }
                    match event.kind {
                        EventKind::Create(_) | EventKind::Modify(_) => {
                            result = Some(SettingsEvent::Changed);
                        }
                        EventKind::Remove(_) => {
                            result = Some(SettingsEvent::Deleted);
                        }
                        _ => {}
                    }
                }
                Ok(Err(e)) => return Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Some(SettingsEvent::Error("watcher disconnected".to_string()));
                }
            }
        }
        result
    }
}
