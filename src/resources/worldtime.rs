//! Shared frame clock.
//!
//! Written once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time) and read by
//! every system that needs a timestamp or a frame delta.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since startup.
    pub elapsed: f32,
    /// Scaled seconds since the previous frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Elapsed time in milliseconds, the unit the rotation engine stamps frames with.
    pub fn elapsed_ms(&self) -> f64 {
        f64::from(self.elapsed) * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_at_normal_speed() {
        let wt = WorldTime::default();
        assert_eq!(wt.time_scale, 1.0);
        assert_eq!(wt.elapsed, 0.0);
        assert_eq!(wt.frame_count, 0);
    }

    #[test]
    fn test_elapsed_ms() {
        let wt = WorldTime {
            elapsed: 1.5,
            ..Default::default()
        };
        assert!((wt.elapsed_ms() - 1500.0).abs() < 1e-6);
    }
}
