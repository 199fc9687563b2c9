//! Pointer systems.
//!
//! - [`update_input_state`] reads the mouse from Raylib each frame and writes
//!   the results into [`PointerState`].
//! - [`drag_rotation_system`] turns press/move/release on a dial into the
//!   engine's gesture calls.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::rotatable::Rotatable;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::pointer::PointerState;

/// Poll Raylib for pointer input and update the `PointerState` resource.
///
/// Pressing the debug key emits
/// [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
pub fn update_input_state(
    mut pointer: ResMut<PointerState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let position = rl.get_mouse_position();
    let down = rl.is_mouse_button_down(pointer.button_binding);
    pointer.set(position.x, position.y, down);

    if rl.is_key_pressed(pointer.debug_binding) {
        commands.trigger(SwitchDebugEvent {});
    }
}

/// Drive dial gestures from [`PointerState`].
///
/// A press inside a dial's radius grabs it: the gesture begins and the press
/// position is sampled. While held, every frame samples the pointer. Release
/// ends the gesture. Only one dial is grabbed at a time.
pub fn drag_rotation_system(
    pointer: Res<PointerState>,
    mut grabbed: Local<Option<Entity>>,
    mut query: Query<(Entity, &mut Rotatable)>,
) {
    let (x, y) = (pointer.position.x, pointer.position.y);
    let sample = (f64::from(x), f64::from(y));

    if pointer.button.just_pressed && grabbed.is_none() {
        if let Some((entity, mut dial)) = query.iter_mut().find(|(_, dial)| dial.contains(x, y)) {
            debug!("Grabbed dial {:?} at ({}, {})", entity, x, y);
            dial.engine.begin_gesture();
            dial.engine.sample_pointer(sample);
            *grabbed = Some(entity);
        }
        return;
    }

    let Some(entity) = *grabbed else {
        return;
    };
    let Ok((_, mut dial)) = query.get_mut(entity) else {
        // dial despawned mid-drag
        *grabbed = None;
        return;
    };

    if pointer.button.active {
        dial.engine.sample_pointer(sample);
    } else {
        dial.engine.end_gesture();
        *grabbed = None;
    }
}
