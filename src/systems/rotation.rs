//! Rotation tick system.
//!
//! Advances every dial's [`RotationEngine`](crate::engine::RotationEngine) by
//! one frame, re-emits the queued engine notifications as
//! [`RotationChangedEvent`]s and keeps the displayed [`Rotation`] in sync.
//!
//! A stepped dial with a transition time does not snap: when it reports
//! progress, a [`TweenRotation`] is attached that eases the displayed angle
//! to the new step over the transition time.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::rotatable::Rotatable;
use crate::components::rotation::Rotation;
use crate::components::tween::TweenRotation;
use crate::engine::listeners::EventKind;
use crate::events::rotation::RotationChangedEvent;
use crate::resources::worldtime::WorldTime;

pub fn rotation_tick_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Rotatable, &mut Rotation)>,
    mut commands: Commands,
) {
    let now = world_time.elapsed_ms();

    for (entity, mut dial, mut rotation) in query.iter_mut() {
        dial.engine.tick(now);

        let angle = dial.engine.angle();
        let notices = dial.take_notices();
        let moved = notices.iter().any(|n| n.kind == EventKind::Progress);

        for notice in &notices {
            commands.trigger(RotationChangedEvent::from_notice(entity, notice, angle));
        }

        let state = dial.engine.state();
        if state.is_stepped() && state.step_transition_time > 0.0 {
            if moved {
                let seconds = (state.step_transition_time / 1000.0) as f32;
                trace!(
                    "Dial {:?} easing {} -> {} over {}s",
                    entity, rotation.degrees, angle, seconds
                );
                commands.entity(entity).insert(
                    TweenRotation::new(rotation.degrees, angle as f32, seconds)
                        .with_easing(dial.engine.easing()),
                );
            }
        } else {
            rotation.degrees = angle as f32;
        }
    }
}
