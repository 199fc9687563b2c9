//! Step transition animation.
//!
//! [`tween_rotation_system`] moves a dial's displayed
//! [`Rotation`](crate::components::rotation::Rotation) towards the next
//! stepped angle using the [`TweenRotation`] attached by the rotation system.
//! Time comes from [`WorldTime`](crate::resources::worldtime::WorldTime).

use crate::components::rotation::Rotation;
use crate::components::tween::{Easing, TweenRotation};
use crate::resources::worldtime::WorldTime;
use bevy_ecs::prelude::*;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0].
pub(crate) fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::QuadInOut if t < 0.5 => 2.0 * t * t,
        Easing::QuadInOut => 1.0 - 2.0 * (1.0 - t) * (1.0 - t),
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        Easing::CubicInOut if t < 0.5 => 4.0 * t * t * t,
        Easing::CubicInOut => 1.0 - 4.0 * (1.0 - t).powi(3),
    }
}

pub(crate) fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Advance a one-shot tween by `dt` seconds. Returns the eased progress.
pub(crate) fn advance(tw: &mut TweenRotation, dt: f32) -> f32 {
    tw.time = (tw.time + dt).min(tw.duration);
    if tw.time >= tw.duration {
        tw.playing = false;
        return 1.0;
    }
    ease(tw.easing, tw.time / tw.duration)
}

/// Animate entity rotations based on [`TweenRotation`] components.
pub fn tween_rotation_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut Rotation, &mut TweenRotation)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut rot, mut tw) in query.iter_mut() {
        if !tw.playing {
            continue;
        }
        let t = advance(&mut tw, dt);
        rot.degrees = lerp_f32(tw.from, tw.to, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== EASING FUNCTION TESTS ====================

    #[test]
    fn test_ease_endpoints_and_clamping() {
        for easing in Easing::ALL {
            assert!(approx_eq(ease(easing, 0.0), 0.0), "{easing} at 0");
            assert!(approx_eq(ease(easing, 1.0), 1.0), "{easing} at 1");
            assert!(approx_eq(ease(easing, -0.5), 0.0), "{easing} below 0");
            assert!(approx_eq(ease(easing, 1.5), 1.0), "{easing} above 1");
        }
    }

    #[test]
    fn test_ease_known_values() {
        assert!(approx_eq(ease(Easing::Linear, 0.25), 0.25));
        assert!(approx_eq(ease(Easing::QuadIn, 0.5), 0.25));
        assert!(approx_eq(ease(Easing::QuadOut, 0.5), 0.75));
        assert!(approx_eq(ease(Easing::QuadInOut, 0.25), 0.125));
        assert!(approx_eq(ease(Easing::QuadInOut, 0.75), 0.875));
        assert!(approx_eq(ease(Easing::CubicIn, 0.5), 0.125));
        assert!(approx_eq(ease(Easing::CubicOut, 0.5), 0.875));
        assert!(approx_eq(ease(Easing::CubicInOut, 0.25), 0.0625));
        assert!(approx_eq(ease(Easing::CubicInOut, 0.75), 0.9375));
    }

    #[test]
    fn test_ease_in_out_meets_at_midpoint() {
        assert!(approx_eq(ease(Easing::QuadInOut, 0.5), 0.5));
        assert!(approx_eq(ease(Easing::CubicInOut, 0.5), 0.5));
    }

    #[test]
    fn test_ease_monotonicity() {
        for easing in Easing::ALL {
            let mut prev = ease(easing, 0.0);
            for i in 1..=100 {
                let curr = ease(easing, i as f32 / 100.0);
                assert!(curr >= prev - EPSILON, "{easing} not monotonic at step {i}");
                prev = curr;
            }
        }
    }

    // ==================== ADVANCE TESTS ====================

    #[test]
    fn test_lerp_f32() {
        assert!(approx_eq(lerp_f32(0.0, 15.0, 0.0), 0.0));
        assert!(approx_eq(lerp_f32(0.0, 15.0, 1.0), 15.0));
        assert!(approx_eq(lerp_f32(30.0, 15.0, 0.5), 22.5));
    }

    #[test]
    fn test_advance_stops_at_duration() {
        let mut tw = TweenRotation::new(0.0, 15.0, 0.1);
        assert!(approx_eq(advance(&mut tw, 0.05), 0.5));
        assert!(tw.playing);
        assert!(approx_eq(advance(&mut tw, 0.2), 1.0));
        assert!(!tw.playing);
        assert!(approx_eq(tw.time, 0.1));
    }

    #[test]
    fn test_advance_zero_duration_finishes_immediately() {
        let mut tw = TweenRotation::new(0.0, 15.0, 0.0);
        assert!(approx_eq(advance(&mut tw, 0.0), 1.0));
        assert!(!tw.playing);
    }

    // ==================== SYSTEM TESTS ====================

    fn run_frame(world: &mut World, delta: f32) {
        world.resource_mut::<WorldTime>().delta = delta;
        let mut schedule = Schedule::default();
        schedule.add_systems(tween_rotation_system);
        schedule.run(world);
    }

    #[test]
    fn test_tween_rotation_system_reaches_target() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let entity = world
            .spawn((
                Rotation::new(0.0),
                TweenRotation::new(0.0, 30.0, 0.1).with_easing(Easing::QuadOut),
            ))
            .id();

        run_frame(&mut world, 0.05);
        let halfway = world.get::<Rotation>(entity).unwrap().degrees;
        assert!(approx_eq(halfway, 22.5));

        run_frame(&mut world, 0.05);
        run_frame(&mut world, 0.05);
        assert!(approx_eq(world.get::<Rotation>(entity).unwrap().degrees, 30.0));
        assert!(!world.get::<TweenRotation>(entity).unwrap().playing);
    }

    #[test]
    fn test_finished_tween_leaves_rotation_alone() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let mut tw = TweenRotation::new(0.0, 30.0, 0.1);
        tw.playing = false;
        let entity = world.spawn((Rotation::new(45.0), tw)).id();

        run_frame(&mut world, 0.05);
        assert!(approx_eq(world.get::<Rotation>(entity).unwrap().degrees, 45.0));
    }
}
