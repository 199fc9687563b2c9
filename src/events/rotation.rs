//! Rotation notifications re-emitted into the ECS world.
//!
//! Each [`RotationNotice`](crate::components::rotatable::RotationNotice)
//! queued by a dial's engine during a frame is triggered as a
//! [`RotationChangedEvent`] by
//! [`rotation_tick_system`](crate::systems::rotation::rotation_tick_system).
//! Observers receive them in the order the engine produced them.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<RotationChangedEvent>| {
//!     if trigger.kind == EventKind::Progress {
//!         println!("dial at {}", trigger.angle);
//!     }
//! });
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::rotatable::RotationNotice;
use crate::engine::listeners::EventKind;
use crate::engine::state::Direction;

/// A dial started, moved, stopped, or changed direction.
///
/// For [`EventKind::ChangeDirection`] only `direction` is meaningful; the
/// angle fields carry the dial's angle at the time the event was re-emitted.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RotationChangedEvent {
    /// The dial entity.
    pub entity: Entity,
    pub kind: EventKind,
    /// Visible angle in degrees.
    pub angle: f64,
    pub virtual_angle: f64,
    pub speed: f64,
    pub direction: Direction,
}

impl RotationChangedEvent {
    /// Build the event for `entity`. Direction notices carry no motion, so
    /// they report `current_angle` and zero speed.
    pub fn from_notice(entity: Entity, notice: &RotationNotice, current_angle: f64) -> Self {
        let (angle, virtual_angle, speed) = match notice.motion {
            Some(motion) => (motion.angle, motion.virtual_angle, motion.speed),
            None => (current_angle, current_angle, 0.0),
        };

        RotationChangedEvent {
            entity,
            kind: notice.kind,
            angle,
            virtual_angle,
            speed,
            direction: notice.direction,
        }
    }
}

/// Observer that logs every dial notification.
pub fn log_rotation_observer(trigger: On<RotationChangedEvent>) {
    let event = trigger.event();
    debug!(
        "{:?} {} angle={:.2} virtual={:.2} speed={:.3} dir={}",
        event.entity,
        event.kind,
        event.angle,
        event.virtual_angle,
        event.speed,
        event.direction.value()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::rotatable::Motion;

    #[test]
    fn test_from_notice_fills_direction_notice() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let notice = RotationNotice {
            kind: EventKind::ChangeDirection,
            direction: Direction::CounterClockwise,
            motion: None,
        };

        let event = RotationChangedEvent::from_notice(entity, &notice, 42.0);
        assert_eq!(event.entity, entity);
        assert_eq!(event.angle, 42.0);
        assert_eq!(event.virtual_angle, 42.0);
        assert_eq!(event.speed, 0.0);
        assert_eq!(event.direction, Direction::CounterClockwise);
    }

    #[test]
    fn test_from_notice_keeps_progress_values() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let notice = RotationNotice {
            kind: EventKind::Progress,
            direction: Direction::Clockwise,
            motion: Some(Motion {
                angle: 15.0,
                virtual_angle: 375.0,
                speed: 2.5,
                active: false,
            }),
        };

        let event = RotationChangedEvent::from_notice(entity, &notice, 0.0);
        assert_eq!(event.kind, EventKind::Progress);
        assert_eq!(event.angle, 15.0);
        assert_eq!(event.virtual_angle, 375.0);
        assert_eq!(event.speed, 2.5);
    }
}
