//! Line-oriented input scripts for driving the machine without a camera or
//! renderer.
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! gesture <kind> [x]   hand sample (kind: none|close|fist|open|grab)
//! down | up            pointer button
//! move <x>             pointer move
//! image <ref>          submit an image reference
//! pick <uuid|index>    explicit photo selection
//! wait <ms>            advance the clock
//! state | status       print the scene snapshot / overlay status
//! ```

use crate::constants::NEUTRAL_X;
use crate::input::ManualClock;
use crate::interaction::{InteractionMachine, Outcome};
use crate::types::{GestureKind, GestureSample, ImageRef, PhotoId};
use anyhow::{Context, Result, anyhow, bail};
use rand::Rng;
use std::str::FromStr;
use uuid::Uuid;

/// Target of a `pick` command.
#[derive(Debug, Clone, PartialEq)]
pub enum PickTarget {
    Id(PhotoId),
    /// Position in creation order
    Index(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Gesture(GestureSample),
    PointerDown,
    PointerUp,
    PointerMove(f32),
    Image(ImageRef),
    Pick(PickTarget),
    Wait(u64),
    State,
    Status,
}

fn parse_x(arg: Option<&str>, default: Option<f32>) -> Result<f32> {
    match (arg, default) {
        (Some(raw), _) => raw
            .parse::<f32>()
            .with_context(|| format!("invalid position '{raw}'")),
        (None, Some(x)) => Ok(x),
        (None, None) => bail!("missing position"),
    }
}

impl FromStr for ScriptCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or_else(|| anyhow!("empty command"))?;
        let arg = parts.next();

        let command = match verb.to_ascii_lowercase().as_str() {
            "gesture" => {
                let kind = GestureKind::from_label(arg.unwrap_or_default());
                let x = parse_x(parts.next(), Some(NEUTRAL_X))?;
                ScriptCommand::Gesture(GestureSample::new(kind, x))
            }
            "down" => ScriptCommand::PointerDown,
            "up" => ScriptCommand::PointerUp,
            "move" => ScriptCommand::PointerMove(parse_x(arg, None)?),
            "image" => {
                let reference = arg.ok_or_else(|| anyhow!("missing image reference"))?;
                ScriptCommand::Image(ImageRef::new(reference))
            }
            "pick" => {
                let raw = arg.ok_or_else(|| anyhow!("missing photo id or index"))?;
                let target = match raw.parse::<usize>() {
                    Ok(index) => PickTarget::Index(index),
                    Err(_) => PickTarget::Id(PhotoId::from_uuid(
                        Uuid::parse_str(raw).with_context(|| format!("invalid photo id '{raw}'"))?,
                    )),
                };
                ScriptCommand::Pick(target)
            }
            "wait" => {
                let raw = arg.ok_or_else(|| anyhow!("missing duration"))?;
                ScriptCommand::Wait(
                    raw.parse()
                        .with_context(|| format!("invalid duration '{raw}'"))?,
                )
            }
            "state" => ScriptCommand::State,
            "status" => ScriptCommand::Status,
            other => bail!("unknown command '{other}'"),
        };
        Ok(command)
    }
}

/// Parse a script line; `None` for blank lines and comments.
pub fn parse_line(line: &str) -> Option<Result<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line.parse())
    }
}

/// What running one command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptOutput {
    Outcome(Outcome),
    /// JSON document to print
    Json(String),
    Waited,
}

/// Applies script commands to a machine driven by a manual clock.
pub struct ScriptRunner<R: Rng> {
    machine: InteractionMachine<R>,
    clock: ManualClock,
}

impl<R: Rng> ScriptRunner<R> {
    pub fn new(machine: InteractionMachine<R>) -> Self {
        let clock = ManualClock::new();
        let machine = machine.with_clock(clock.clone());
        Self { machine, clock }
    }

    pub fn machine(&self) -> &InteractionMachine<R> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut InteractionMachine<R> {
        &mut self.machine
    }

    pub fn run(&mut self, command: ScriptCommand) -> Result<ScriptOutput> {
        let output = match command {
            ScriptCommand::Gesture(sample) => ScriptOutput::Outcome(self.machine.on_gesture_sample(sample)),
            ScriptCommand::PointerDown => ScriptOutput::Outcome(self.machine.on_pointer_down()),
            ScriptCommand::PointerUp => ScriptOutput::Outcome(self.machine.on_pointer_up()),
            ScriptCommand::PointerMove(x) => ScriptOutput::Outcome(self.machine.on_pointer_move(x)),
            ScriptCommand::Image(image) => {
                ScriptOutput::Outcome(Outcome::PhotoAdded(self.machine.on_image_submitted(image)))
            }
            ScriptCommand::Pick(target) => {
                let id = match target {
                    PickTarget::Id(id) => id,
                    PickTarget::Index(index) => self
                        .machine
                        .photos()
                        .get(index)
                        .map(|p| p.id)
                        .ok_or_else(|| anyhow!("no photo at index {index}"))?,
                };
                ScriptOutput::Outcome(self.machine.on_photo_picked(id))
            }
            ScriptCommand::Wait(ms) => {
                self.clock.advance_ms(ms);
                ScriptOutput::Waited
            }
            ScriptCommand::State => ScriptOutput::Json(serde_json::to_string(&self.machine.snapshot())?),
            ScriptCommand::Status => {
                ScriptOutput::Json(serde_json::to_string(&self.machine.overlay_status())?)
            }
        };
        Ok(output)
    }
}
