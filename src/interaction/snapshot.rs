//! Read-only views published to the rendering and overlay collaborators.

use super::state::InteractionState;
use crate::types::{GestureKind, Mode, PhotoArtifact, PhotoId};
use serde::Serialize;
use std::sync::Arc;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub mode: Mode,
    pub selected_photo: Option<PhotoId>,
    pub rotation_offset: f64,
    pub current_gesture: GestureKind,
    /// Photos in creation order
    pub photos: Arc<Vec<PhotoArtifact>>,
    /// Per-frame interpolation factor for displayed positions
    pub animation_speed: f32,
}

impl SceneSnapshot {
    pub(crate) fn capture(
        state: &InteractionState,
        photos: &Arc<Vec<PhotoArtifact>>,
        animation_speed: f32,
    ) -> Self {
        Self {
            mode: state.mode(),
            selected_photo: state.selected_photo(),
            rotation_offset: state.rotation_offset(),
            current_gesture: state.current_gesture(),
            photos: Arc::clone(photos),
            animation_speed,
        }
    }

    pub fn selected(&self) -> Option<&PhotoArtifact> {
        let id = self.selected_photo?;
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn overlay_status(&self) -> OverlayStatus {
        OverlayStatus::new(self.mode, self.current_gesture, self.photos.len())
    }
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self::capture(
            &InteractionState::default(),
            &Arc::new(Vec::new()),
            crate::constants::ANIMATION_SPEED,
        )
    }
}

/// Status line data for the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayStatus {
    pub mode: Mode,
    pub mode_label: &'static str,
    pub gesture: GestureKind,
    pub gesture_label: &'static str,
    pub photo_count: usize,
    pub hint: &'static str,
}

impl OverlayStatus {
    pub fn new(mode: Mode, gesture: GestureKind, photo_count: usize) -> Self {
        Self {
            mode,
            mode_label: mode.label(),
            gesture,
            gesture_label: gesture.label(),
            photo_count,
            hint: mode.hint(),
        }
    }
}
