//! Error types for the ambient layers.
//!
//! The interaction core itself is infallible; only settings I/O and the
//! actor runtime can fail.

use thiserror::Error;

/// Errors that can occur while loading, saving or watching settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher error from notify
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Platform has no config directory
    #[error("No config directory available")]
    NoConfigDir,
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors from the interaction runtime (actor)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The worker has stopped and no longer accepts input
    #[error("interaction runtime is not running")]
    Disconnected,

    /// The worker thread could not be started
    #[error("failed to spawn interaction worker: {0}")]
    Spawn(String),

    /// The worker thread panicked
    #[error("interaction worker panicked")]
    WorkerPanicked,
}
