//! The mutable record owned by a [`RotationEngine`](super::RotationEngine).
//!
//! Listeners and callers only ever see it through a shared reference; every
//! write goes through an engine method.

use serde::Serialize;

use super::options::RotationOptions;
use super::pointer::PointerSample;

/// Sense of the most recent nonzero rotation.
///
/// The sign follows the angle: `angle - last_applied_angle > 0` is
/// [`Direction::Clockwise`] and reports `1`. That is the opposite sign of a
/// `last_applied_angle - angle` difference, so the first clockwise turn from
/// the initial direction does not fire `rotate.changeDirection`. Serializes as its
/// [`value`](Direction::value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "i32")]
pub enum Direction {
    /// Angle increasing, clockwise on a y-down screen.
    #[default]
    Clockwise,
    /// Angle decreasing.
    CounterClockwise,
}

impl Direction {
    /// Direction of a signed delta. Zero has no direction.
    pub fn of(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Direction::Clockwise)
        } else if delta < 0.0 {
            Some(Direction::CounterClockwise)
        } else {
            None
        }
    }

    /// `1` while the angle increases, `-1` while it decreases.
    pub fn value(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

impl From<Direction> for i32 {
    fn from(direction: Direction) -> i32 {
        direction.value()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationState {
    /// A drag gesture is in progress.
    pub active: bool,
    /// Visible angle: normalized to `[0, 360)` or a multiple of `step`.
    pub angle: f64,
    /// Unquantized accumulated angle.
    pub virtual_angle: f64,
    /// Angle at the last progress notification.
    pub last_applied_angle: f64,
    /// Signed degrees per frame.
    pub speed: f64,
    pub direction: Direction,
    /// Pointer angle at the previous frame of the gesture.
    pub last_mouse_angle: Option<f64>,
    /// Virtual angle when the gesture anchors were taken.
    pub last_element_angle: Option<f64>,
    /// Latest pointer position, consumed on the next frame.
    pub last_pointer: Option<PointerSample>,
    /// Pointer travel: per frame when easing steps, since the anchor otherwise.
    pub mouse_diff: f64,
    /// A step transition is pending; progress notifications are held back.
    pub transiting: bool,
    /// Frame timestamp (ms) at which the pending transition ends.
    pub transition_ends_at: Option<f64>,
    pub frame: u64,

    // configuration, fixed for the engine's lifetime
    pub cx: f64,
    pub cy: f64,
    pub step: f64,
    pub step_transition_time: f64,
    pub step_transition_easing: String,
    pub inertia: f64,
    pub minimal_speed: f64,
    pub minimal_angle_change: f64,
}

impl RotationState {
    /// Fresh state from already validated options.
    pub(crate) fn from_options(options: &RotationOptions) -> Self {
        RotationState {
            active: false,
            angle: options.angle,
            virtual_angle: options.angle,
            last_applied_angle: options.angle,
            speed: options.speed,
            direction: Direction::default(),
            last_mouse_angle: None,
            last_element_angle: None,
            last_pointer: None,
            mouse_diff: 0.0,
            transiting: false,
            transition_ends_at: None,
            frame: 0,
            cx: options.cx,
            cy: options.cy,
            step: options.step,
            step_transition_time: options.step_transition_time,
            step_transition_easing: options.step_transition_easing.clone(),
            inertia: options.inertia,
            minimal_speed: options.minimal_speed,
            minimal_angle_change: options.effective_minimal_angle_change(),
        }
    }

    /// Stepping is enabled.
    pub fn is_stepped(&self) -> bool {
        self.step > 0.0
    }

    /// Pointer deltas drive speed directly instead of the per-frame net change.
    pub fn is_eager(&self) -> bool {
        self.step_transition_time > 0.0
    }

    /// The engine has come to rest: no gesture, no momentum, no transition.
    ///
    /// Without inertia a leftover speed never moves the angle, so it does not
    /// count as momentum.
    pub fn is_settled(&self) -> bool {
        !self.active && !self.transiting && (self.speed == 0.0 || self.inertia <= 0.0)
    }
}
