//! Input arbitration layer.
//!
//! Two producers compete for the interaction state: continuous hand-gesture
//! samples from the tracking collaborator and discrete events from the native
//! pointer. This module normalizes both into [`InputEvent`]s and decides which
//! are authoritative.
//!
//! ## Modules
//!
//! - `clock` - Monotonic clock abstraction (real and manual)
//! - `event` - Unified, arrival-stamped input events
//! - `arbiter` - Quiet-window arbitration and pointer-to-gesture mapping

mod arbiter;
mod clock;
mod event;

pub use arbiter::{InputArbiter, PointerAction, QUIET_WINDOW, Verdict, translate_pointer};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use event::{InputEvent, InputKind, InputSource};
