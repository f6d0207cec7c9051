//! Unified input events.
//!
//! Both producers (hand tracking and the native pointer) plus the upload and
//! render collaborators feed the state machine through one enum, stamped with
//! the arrival time.

use crate::types::{GestureSample, ImageRef, PhotoId, PointerEvent, PointerKind};
use std::time::Instant;

/// Where an input came from; decides how arbitration treats it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Hand-tracking collaborator - always authoritative
    Hand,
    /// Native pointer - fallback, subject to the quiet window
    Pointer,
    /// Upload / render collaborators - not arbitrated
    Direct,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    Gesture(GestureSample),
    Pointer(PointerEvent),
    ImageSubmitted(ImageRef),
    PhotoPicked(PhotoId),
}

impl InputKind {
    pub fn source(&self) -> InputSource {
        match self {
            InputKind::Gesture(_) => InputSource::Hand,
            InputKind::Pointer(_) => InputSource::Pointer,
            InputKind::ImageSubmitted(_) | InputKind::PhotoPicked(_) => InputSource::Direct,
        }
    }

    /// Stable name used for logging and dispatch statistics.
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Gesture(_) => "gesture",
            InputKind::Pointer(p) => match p.kind {
                PointerKind::Down => "pointer_down",
                PointerKind::Up => "pointer_up",
                PointerKind::Move => "pointer_move",
            },
            InputKind::ImageSubmitted(_) => "image_submitted",
            InputKind::PhotoPicked(_) => "photo_picked",
        }
    }
}

/// An input stamped with its arrival time.
#[derive(Clone, Debug, PartialEq)]
pub struct InputEvent {
    pub at: Instant,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn new(at: Instant, kind: InputKind) -> Self {
        Self { at, kind }
    }

    pub fn gesture(at: Instant, sample: GestureSample) -> Self {
        Self::new(at, InputKind::Gesture(sample))
    }

    pub fn pointer(at: Instant, event: PointerEvent) -> Self {
        Self::new(at, InputKind::Pointer(event))
    }

    pub fn source(&self) -> InputSource {
        self.kind.source()
    }
}
