//! Actor runtime - runs the interaction machine on its own thread.
//!
//! Producers (tracking thread, pointer callbacks, upload code) hold cloneable
//! [`InteractionHandle`]s and send arrival-stamped [`InputEvent`]s over a
//! channel. The worker is the single owner of the machine: it applies events
//! in arrival order and publishes a fresh [`SceneSnapshot`] after each state
//! change.
//! Renderer and overlay poll the latest snapshot once per frame.
//!
//! ```text
//! tracking ──┐
//! pointer  ──┼── mpsc ──> worker (InteractionMachine) ──> RwLock<SceneSnapshot>
//! upload   ──┘                                              ^
//!                                               renderer ───┘ (poll per frame)
//! ```

use crate::error::RuntimeError;
use crate::input::{Clock, InputEvent, InputKind, MonotonicClock};
use crate::interaction::{InteractionMachine, SceneSnapshot};
use crate::perf::{DispatchStats, measure};
use crate::settings::Settings;
use crate::types::{GestureSample, ImageRef, PhotoId, PointerEvent};
use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

enum Command {
    Input(InputEvent),
    ApplySettings(Box<Settings>),
    Shutdown,
}

/// Cloneable sending side of a running interaction machine.
#[derive(Clone)]
pub struct InteractionHandle {
    tx: Sender<Command>,
    snapshot: Arc<RwLock<SceneSnapshot>>,
    clock: Arc<dyn Clock>,
}

impl InteractionHandle {
    fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.tx.send(command).map_err(|_| RuntimeError::Disconnected)
    }

    /// Send an input stamped with the current time.
    pub fn send_input(&self, kind: InputKind) -> Result<(), RuntimeError> {
        self.send(Command::Input(InputEvent::new(self.clock.now(), kind)))
    }

    /// Send a pre-stamped input.
    pub fn send_event(&self, event: InputEvent) -> Result<(), RuntimeError> {
        self.send(Command::Input(event))
    }

    pub fn on_gesture_sample(&self, sample: GestureSample) -> Result<(), RuntimeError> {
        self.send_input(InputKind::Gesture(sample))
    }

    pub fn on_pointer_down(&self) -> Result<(), RuntimeError> {
        self.send_input(InputKind::Pointer(PointerEvent::down()))
    }

    pub fn on_pointer_up(&self) -> Result<(), RuntimeError> {
        self.send_input(InputKind::Pointer(PointerEvent::up()))
    }

    pub fn on_pointer_move(&self, normalized_x: f32) -> Result<(), RuntimeError> {
        self.send_input(InputKind::Pointer(PointerEvent::moved(normalized_x)))
    }

    /// Queue an image for placement. The photo appears in a later snapshot.
    pub fn on_image_submitted(&self, image: impl Into<ImageRef>) -> Result<(), RuntimeError> {
        self.send_input(InputKind::ImageSubmitted(image.into()))
    }

    pub fn on_photo_picked(&self, id: PhotoId) -> Result<(), RuntimeError> {
        self.send_input(InputKind::PhotoPicked(id))
    }

    pub fn apply_settings(&self, settings: Settings) -> Result<(), RuntimeError> {
        self.send(Command::ApplySettings(Box::new(settings)))
    }

    /// Latest published state. Cheap: photos are shared, not copied.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.snapshot.read().clone()
    }
}

/// A running worker; dropping it without `shutdown` detaches the thread,
/// which exits once every handle is dropped.
pub struct InteractionRuntime<R: Rng + Send + 'static> {
    handle: InteractionHandle,
    worker: JoinHandle<(InteractionMachine<R>, DispatchStats)>,
}

impl<R: Rng + Send + 'static> InteractionRuntime<R> {
    /// Move `machine` onto a worker thread, stamping inputs with the real
    /// monotonic clock.
    pub fn spawn(machine: InteractionMachine<R>) -> Result<Self, RuntimeError> {
        Self::spawn_with_clock(machine, MonotonicClock)
    }

    /// Like [`InteractionRuntime::spawn`] with a caller-supplied clock for
    /// handle-side stamping.
    pub fn spawn_with_clock(
        machine: InteractionMachine<R>,
        clock: impl Clock + 'static,
    ) -> Result<Self, RuntimeError> {
        let (tx, rx) = mpsc::channel();
        let snapshot = Arc::new(RwLock::new(machine.snapshot()));
        let published = Arc::clone(&snapshot);

        let worker = thread::Builder::new()
            .name("interaction".to_string())
            .spawn(move || run_worker(machine, rx, published))
            .map_err(|e| RuntimeError::Spawn(e.to_string()))?;

        info!("Interaction runtime started");
        Ok(Self {
            handle: InteractionHandle {
                tx,
                snapshot,
                clock: Arc::new(clock),
            },
            worker,
        })
    }

    pub fn handle(&self) -> InteractionHandle {
        self.handle.clone()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.handle.snapshot()
    }

    /// Stop the worker after it drains queued input; returns the machine.
    pub fn shutdown(self) -> Result<(InteractionMachine<R>, DispatchStats), RuntimeError> {
        let _ = self.handle.send(Command::Shutdown);
        self.worker.join().map_err(|_| RuntimeError::WorkerPanicked)
    }
}

fn run_worker<R: Rng>(
    mut machine: InteractionMachine<R>,
    rx: Receiver<Command>,
    published: Arc<RwLock<SceneSnapshot>>,
) -> (InteractionMachine<R>, DispatchStats) {
    let mut stats = DispatchStats::new();

    for command in rx {
        match command {
            Command::Input(event) => {
                let kind = event.kind.name();
                let (outcome, elapsed_ms) = measure(|| machine.dispatch(event));
                stats.record(kind, elapsed_ms);
                if outcome.changed_state() {
                    *published.write() = machine.snapshot();
                }
            }
            Command::ApplySettings(settings) => {
                machine.apply_settings(*settings);
                *published.write() = machine.snapshot();
            }
            Command::Shutdown => break,
        }
    }

    debug!(dispatched = stats.total_dispatched(), "Interaction runtime stopping");
    stats.log_summary();
    (machine, stats)
}
