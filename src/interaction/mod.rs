//! Interaction state machine.
//!
//! The single authority over mode, selection and rotation. Inputs from every
//! collaborator are applied here, one at a time, in arrival order.
//!
//! - `state` - Mode/selection/rotation and the transition rules
//! - `machine` - Owner of state, photos and arbitration; collaborator entry points
//! - `snapshot` - Read-only views for the renderer and overlay

mod machine;
mod snapshot;
mod state;

pub use machine::{InteractionMachine, Outcome};
pub use snapshot::{OverlayStatus, SceneSnapshot};
pub use state::InteractionState;
