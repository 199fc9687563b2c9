use bevy_ecs::prelude::Component;

/// Angle at which an entity is drawn, in degrees.
///
/// Written by the rotation system from the engine's visible angle, either
/// directly or through a [`TweenRotation`](super::tween::TweenRotation).
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    pub fn new(degrees: f32) -> Self {
        Rotation { degrees }
    }

    /// Unit vector the angle points along on a y-down screen; 0 is straight up.
    pub fn direction(&self) -> (f32, f32) {
        let radians = self.degrees.to_radians();
        (radians.sin(), -radians.cos())
    }
}
