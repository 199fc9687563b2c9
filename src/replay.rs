//! Headless replay of a recorded gesture.
//!
//! A [`Recording`] is a JSON document holding engine options and a list of
//! timestamped pointer inputs:
//!
//! ```json
//! {
//!   "options": { "cx": 100, "cy": 100, "inertia": 0.9 },
//!   "inputs": [
//!     { "at": 0,  "type": "down", "pageX": 100, "pageY": 50 },
//!     { "at": 20, "type": "move", "targetTouches": [{ "pageX": 150, "pageY": 100 }] },
//!     { "at": 40, "type": "up" }
//!   ]
//! }
//! ```
//!
//! [`replay`] feeds the inputs to a fresh engine driven by a
//! [`FixedStepScheduler`] and collects every notification as a
//! [`ReplayLine`] stamped with the frame it happened in. Inputs due at or
//! before a frame's timestamp are applied before that frame is ticked.

use std::io::Write;
use std::path::Path;

use crossbeam_channel::{Receiver, unbounded};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::engine::RotationEngine;
use crate::engine::listeners::{EventKind, RotateEvent};
use crate::engine::options::RotationOptions;
use crate::engine::pointer::PointerEvent;
use crate::engine::scheduler::{FixedStepScheduler, FrameScheduler};
use crate::engine::state::{Direction, RotationState};
use crate::error::Result;

/// How long the engine may keep moving after the last input, in milliseconds.
const SETTLE_TIMEOUT_MS: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Down,
    Move,
    Up,
}

/// One pointer input. Coordinates sit next to `at` and `type`, in the same
/// shape as a DOM mouse or touch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedInput {
    /// Milliseconds since the start of the recording.
    pub at: f64,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(flatten)]
    pub event: PointerEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub options: RotationOptions,
    pub inputs: Vec<RecordedInput>,
}

impl Recording {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let recording = Self::from_json_str(&text)?;
        info!(
            "Loaded recording {:?}: {} inputs",
            path.as_ref(),
            recording.inputs.len()
        );
        Ok(recording)
    }
}

/// A notification produced during a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayLine {
    /// Timestamp of the frame the notification happened in.
    pub at: f64,
    /// Event name, e.g. `rotate.progress`.
    pub event: &'static str,
    /// `1` or `-1`.
    pub direction: Direction,
    /// Engine state at the time of the notification; absent for direction changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<RotationState>,
}

/// Notification captured by a listener before it is stamped.
struct Captured {
    kind: EventKind,
    direction: Direction,
    state: Option<RotationState>,
}

/// Run `recording` to completion and return its notifications in order.
///
/// The replay ends once every input has been applied and the engine has
/// settled, or [`SETTLE_TIMEOUT_MS`] after the last input.
pub fn replay(recording: &Recording) -> Result<Vec<ReplayLine>> {
    let mut engine = RotationEngine::new(recording.options.clone())?;
    let captured = capture(&mut engine);

    let mut inputs = recording.inputs.clone();
    inputs.sort_by(|a, b| a.at.total_cmp(&b.at));
    let deadline = inputs.last().map_or(0.0, |input| input.at) + SETTLE_TIMEOUT_MS;
    let mut pending = inputs.into_iter().peekable();

    let mut scheduler = FixedStepScheduler::default();
    let mut lines = Vec::new();

    while let Some(now) = scheduler.next_frame() {
        while let Some(input) = pending.next_if(|input| input.at <= now) {
            apply(&mut engine, &input);
        }
        engine.tick(now);
        lines.extend(captured.try_iter().map(|c| ReplayLine {
            at: now,
            event: c.kind.name(),
            direction: c.direction,
            state: c.state,
        }));

        if pending.peek().is_none() && engine.state().is_settled() {
            break;
        }
        if now > deadline {
            warn!("Replay still moving {}ms after the last input, giving up", SETTLE_TIMEOUT_MS);
            break;
        }
    }

    debug!(
        "Replay finished after {} frames with {} notifications",
        engine.state().frame,
        lines.len()
    );
    Ok(lines)
}

/// Print each line as one JSON object per line.
pub fn write_lines(lines: &[ReplayLine], mut out: impl Write) -> Result<()> {
    for line in lines {
        serde_json::to_writer(&mut out, line)?;
        writeln!(out)?;
    }
    Ok(())
}

fn capture(engine: &mut RotationEngine) -> Receiver<Captured> {
    let (tx, rx) = unbounded();
    for kind in EventKind::ALL {
        let tx = tx.clone();
        engine.on(kind, move |event: &RotateEvent<'_>| {
            let captured = match *event {
                RotateEvent::ChangeDirection(direction) => Captured {
                    kind: EventKind::ChangeDirection,
                    direction,
                    state: None,
                },
                _ => {
                    let state = event.state().cloned();
                    Captured {
                        kind: event.kind(),
                        direction: state.as_ref().map(|s| s.direction).unwrap_or_default(),
                        state,
                    }
                }
            };
            let _ = tx.send(captured);
        });
    }
    rx
}

fn apply(engine: &mut RotationEngine, input: &RecordedInput) {
    match input.kind {
        InputKind::Down => {
            engine.begin_gesture();
            engine.sample_event(&input.event);
        }
        InputKind::Move => engine.sample_event(&input.event),
        InputKind::Up => engine.end_gesture(),
    }
}
