//! Construction options for [`RotationEngine`](super::RotationEngine).
//!
//! Options deserialize from the same camelCase keys a browser host would pass
//! (`cx`, `cy`, `minimalSpeed`, `stepTransitionTime`, ...). Anything missing
//! falls back to the defaults below.
//!
//! ```json
//! { "cx": 200, "cy": 200, "step": 15, "stepTransitionTime": 120,
//!   "stepTransitionEasing": "cubic-out", "inertia": 0.92 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::tween::Easing;
use crate::error::{Error, OptionsError};

pub const DEFAULT_MINIMAL_SPEED: f64 = 0.001;
pub const DEFAULT_MINIMAL_ANGLE_CHANGE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotationOptions {
    /// Pivot x coordinate.
    pub cx: f64,
    /// Pivot y coordinate.
    pub cy: f64,
    /// Initial angle in degrees.
    pub angle: f64,
    /// Initial angular speed in degrees per frame, within `(-180, 180]`.
    pub speed: f64,
    /// Per-frame speed decay factor in `[0, 1)`. Zero disables momentum.
    pub inertia: f64,
    /// Speeds below this magnitude are treated as stopped. Must be positive
    /// when `inertia` is set, or momentum never comes to rest.
    pub minimal_speed: f64,
    /// Smallest angle change that produces a progress notification.
    ///
    /// When unset it defaults to `step` if stepping, 0.1 otherwise.
    pub minimal_angle_change: Option<f64>,
    /// Quantization increment in degrees. Zero means continuous.
    pub step: f64,
    /// Duration in milliseconds of the eased move between steps.
    pub step_transition_time: f64,
    /// Easing curve name for step transitions.
    pub step_transition_easing: String,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            cx: 0.0,
            cy: 0.0,
            angle: 0.0,
            speed: 0.0,
            inertia: 0.0,
            minimal_speed: DEFAULT_MINIMAL_SPEED,
            minimal_angle_change: None,
            step: 0.0,
            step_transition_time: 0.0,
            step_transition_easing: "linear".to_string(),
        }
    }
}

impl RotationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pivot(mut self, cx: f64, cy: f64) -> Self {
        self.cx = cx;
        self.cy = cy;
        self
    }
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }
    pub fn with_minimal_speed(mut self, minimal_speed: f64) -> Self {
        self.minimal_speed = minimal_speed;
        self
    }
    pub fn with_minimal_angle_change(mut self, minimal_angle_change: f64) -> Self {
        self.minimal_angle_change = Some(minimal_angle_change);
        self
    }
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
    pub fn with_step_transition(mut self, time_ms: f64, easing: impl Into<String>) -> Self {
        self.step_transition_time = time_ms;
        self.step_transition_easing = easing.into();
        self
    }

    /// Parse options from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The notification threshold actually in effect.
    pub fn effective_minimal_angle_change(&self) -> f64 {
        match self.minimal_angle_change {
            Some(value) => value,
            None if self.step > 0.0 => self.step,
            None => DEFAULT_MINIMAL_ANGLE_CHANGE,
        }
    }

    /// Check every option against its allowed range.
    ///
    /// Returns the parsed easing so callers don't parse the name twice.
    pub fn validate(&self) -> Result<Easing, OptionsError> {
        for (field, value) in [
            ("cx", self.cx),
            ("cy", self.cy),
            ("angle", self.angle),
            ("speed", self.speed),
        ] {
            if !value.is_finite() {
                return Err(OptionsError::NonFinite { field, value });
            }
        }
        // a larger per-frame move reads as a turn the other way round
        if self.speed <= -180.0 || self.speed > 180.0 {
            return Err(OptionsError::SpeedOutOfRange(self.speed));
        }
        if !(0.0..1.0).contains(&self.inertia) {
            return Err(OptionsError::InertiaOutOfRange(self.inertia));
        }
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(OptionsError::InvalidStep(self.step));
        }
        if !self.step_transition_time.is_finite() || self.step_transition_time < 0.0 {
            return Err(OptionsError::InvalidTransitionTime(self.step_transition_time));
        }
        if !self.minimal_speed.is_finite()
            || self.minimal_speed < 0.0
            || (self.inertia > 0.0 && self.minimal_speed == 0.0)
        {
            return Err(OptionsError::InvalidMinimalSpeed(self.minimal_speed));
        }
        let minimal_angle_change = self.effective_minimal_angle_change();
        if !minimal_angle_change.is_finite() || minimal_angle_change < 0.0 {
            return Err(OptionsError::InvalidMinimalAngleChange(minimal_angle_change));
        }
        self.step_transition_easing
            .parse::<Easing>()
            .map_err(|_| OptionsError::UnknownEasing(self.step_transition_easing.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let opts = RotationOptions::default();
        assert_eq!(opts.cx, 0.0);
        assert_eq!(opts.cy, 0.0);
        assert_eq!(opts.speed, 0.0);
        assert_eq!(opts.inertia, 0.0);
        assert_eq!(opts.minimal_speed, 0.001);
        assert_eq!(opts.effective_minimal_angle_change(), 0.1);
        assert_eq!(opts.step, 0.0);
        assert_eq!(opts.step_transition_time, 0.0);
        assert_eq!(opts.step_transition_easing, "linear");
        assert!(matches!(opts.validate(), Ok(Easing::Linear)));
    }

    #[test]
    fn test_minimal_angle_change_follows_step_when_unset() {
        let opts = RotationOptions::new().with_step(15.0);
        assert_eq!(opts.effective_minimal_angle_change(), 15.0);

        let opts = opts.with_minimal_angle_change(1.0);
        assert_eq!(opts.effective_minimal_angle_change(), 1.0);
    }

    #[test]
    fn test_from_json_uses_camel_case_and_defaults() {
        let opts = RotationOptions::from_json_str(
            r#"{"cx": 100, "cy": 50.5, "minimalSpeed": 0.01, "stepTransitionTime": 200,
                "stepTransitionEasing": "quad-out"}"#,
        )
        .unwrap();
        assert_eq!(opts.cx, 100.0);
        assert_eq!(opts.cy, 50.5);
        assert_eq!(opts.minimal_speed, 0.01);
        assert_eq!(opts.step_transition_time, 200.0);
        assert!(matches!(opts.validate(), Ok(Easing::QuadOut)));
        // untouched fields keep defaults
        assert_eq!(opts.inertia, 0.0);
        assert_eq!(opts.minimal_angle_change, None);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            RotationOptions::from_json_str("{\"cx\": \"left\"}"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_validate_rejects_inertia_out_of_range() {
        for inertia in [-0.1, 1.0, 1.5, f64::NAN] {
            let opts = RotationOptions::new().with_inertia(inertia);
            assert!(
                matches!(opts.validate(), Err(OptionsError::InertiaOutOfRange(_))),
                "inertia {inertia} accepted"
            );
        }
        assert!(RotationOptions::new().with_inertia(0.95).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_step_and_times() {
        assert!(matches!(
            RotationOptions::new().with_step(-15.0).validate(),
            Err(OptionsError::InvalidStep(_))
        ));
        assert!(matches!(
            RotationOptions::new().with_step_transition(-1.0, "linear").validate(),
            Err(OptionsError::InvalidTransitionTime(_))
        ));
        assert!(matches!(
            RotationOptions::new().with_minimal_speed(-0.5).validate(),
            Err(OptionsError::InvalidMinimalSpeed(_))
        ));
        assert!(matches!(
            RotationOptions::new().with_minimal_angle_change(-0.5).validate(),
            Err(OptionsError::InvalidMinimalAngleChange(_))
        ));
    }

    #[test]
    fn test_validate_requires_positive_minimal_speed_with_inertia() {
        let opts = RotationOptions::new().with_inertia(0.9).with_minimal_speed(0.0);
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::InvalidMinimalSpeed(_))
        ));
        // without momentum the threshold is never consulted
        assert!(RotationOptions::new().with_minimal_speed(0.0).validate().is_ok());
        assert!(
            RotationOptions::new()
                .with_inertia(0.9)
                .with_minimal_speed(1e-6)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_validate_bounds_speed_to_half_a_turn() {
        for speed in [270.0, -180.0, 180.5, -400.0] {
            assert!(
                matches!(
                    RotationOptions::new().with_speed(speed).validate(),
                    Err(OptionsError::SpeedOutOfRange(_))
                ),
                "speed {speed} accepted"
            );
        }
        for speed in [180.0, -179.9, 0.0, 42.0] {
            assert!(RotationOptions::new().with_speed(speed).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_geometry() {
        let opts = RotationOptions::new().with_pivot(f64::INFINITY, 0.0);
        assert!(matches!(
            opts.validate(),
            Err(OptionsError::NonFinite { field: "cx", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_easing() {
        let opts = RotationOptions::new().with_step_transition(100.0, "wobbly");
        match opts.validate() {
            Err(OptionsError::UnknownEasing(name)) => assert_eq!(name, "wobbly"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
