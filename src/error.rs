use thiserror::Error;

/// Rejected [`RotationOptions`](crate::engine::options::RotationOptions).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("option `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("inertia must be in [0, 1), got {0}")]
    InertiaOutOfRange(f64),

    #[error("step must be a non-negative number, got {0}")]
    InvalidStep(f64),

    #[error("step transition time must be a non-negative number of milliseconds, got {0}")]
    InvalidTransitionTime(f64),

    #[error("minimal speed must be non-negative, and positive when inertia is set, got {0}")]
    InvalidMinimalSpeed(f64),

    #[error("speed must be within (-180, 180] degrees per frame, got {0}")]
    SpeedOutOfRange(f64),

    #[error("minimal angle change must be non-negative, got {0}")]
    InvalidMinimalAngleChange(f64),

    #[error("unknown easing `{0}`")]
    UnknownEasing(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid rotation options: {0}")]
    Options(#[from] OptionsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
