//! Interaction core for a gesture-controlled photo tree.
//!
//! A 3D holiday tree is driven by hand gestures from a camera, with the mouse
//! as a fallback: close the tree, scatter it into a field of photos, rotate
//! the field, and focus a single photo. Camera classification, rendering and
//! overlay widgets are external collaborators; this crate owns the logic
//! between them.
//!
//! - [`placement`] computes cone-surface and scatter-cloud positions for photos
//! - [`input`] arbitrates between hand samples and pointer events
//! - [`interaction`] is the mode state machine and single state owner
//! - [`runtime`] runs the machine as an actor for multi-threaded hosts

pub mod constants;
pub mod error;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod perf;
pub mod placement;
pub mod runtime;
pub mod script;
pub mod settings;
pub mod settings_watcher;
pub mod types;

pub use error::{RuntimeError, SettingsError};
pub use interaction::{InteractionMachine, InteractionState, Outcome, OverlayStatus, SceneSnapshot};
pub use runtime::{InteractionHandle, InteractionRuntime};
pub use settings::Settings;
pub use types::{GestureKind, GestureSample, ImageRef, Mode, PhotoArtifact, PhotoId, PointerEvent, Vec3};
