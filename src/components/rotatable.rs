//! Component that makes an entity draggable around a pivot.
//!
//! A [`Rotatable`] owns one [`RotationEngine`]. Every engine notification is
//! copied into a [`RotationNotice`] and queued on a crossbeam channel so the
//! rotation system can re-emit it as a bevy event after the engine has
//! released its borrow.

use bevy_ecs::prelude::Component;
use crossbeam_channel::{Receiver, unbounded};

use crate::engine::RotationEngine;
use crate::engine::listeners::{EventKind, RotateEvent};
use crate::engine::options::RotationOptions;
use crate::engine::state::Direction;
use crate::error::OptionsError;

/// Angle and speed carried by start, progress and stop notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub angle: f64,
    pub virtual_angle: f64,
    pub speed: f64,
    pub active: bool,
}

/// Owned copy of an engine notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationNotice {
    pub kind: EventKind,
    pub direction: Direction,
    /// `None` for direction changes.
    pub motion: Option<Motion>,
}

#[derive(Component, Debug)]
pub struct Rotatable {
    pub engine: RotationEngine,
    /// Grab radius around the pivot, in pixels.
    pub radius: f32,
    notices: Receiver<RotationNotice>,
}

impl Rotatable {
    pub fn new(options: RotationOptions, radius: f32) -> Result<Self, OptionsError> {
        let mut engine = RotationEngine::new(options)?;
        let (tx, rx) = unbounded();

        for kind in EventKind::ALL {
            let tx = tx.clone();
            engine.on(kind, move |event: &RotateEvent<'_>| {
                let notice = match *event {
                    RotateEvent::ChangeDirection(direction) => RotationNotice {
                        kind: EventKind::ChangeDirection,
                        direction,
                        motion: None,
                    },
                    RotateEvent::Start(state)
                    | RotateEvent::Progress(state)
                    | RotateEvent::Stop(state) => RotationNotice {
                        kind: event.kind(),
                        direction: state.direction,
                        motion: Some(Motion {
                            angle: state.angle,
                            virtual_angle: state.virtual_angle,
                            speed: state.speed,
                            active: state.active,
                        }),
                    },
                };
                // Receiver lives as long as the component; ignore send error on teardown
                let _ = tx.send(notice);
            });
        }

        Ok(Rotatable {
            engine,
            radius,
            notices: rx,
        })
    }

    /// Whether `(x, y)` falls inside the grab radius.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let state = self.engine.state();
        let dx = f64::from(x) - state.cx;
        let dy = f64::from(y) - state.cy;
        dx * dx + dy * dy <= f64::from(self.radius) * f64::from(self.radius)
    }

    /// Notices queued since the last call, oldest first.
    pub fn take_notices(&self) -> Vec<RotationNotice> {
        self.notices.try_iter().collect()
    }
}
