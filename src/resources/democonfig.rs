//! Demo configuration resource.
//!
//! Manages the demo window and dial settings loaded from an INI configuration
//! file. Provides defaults for safe startup and methods to load/save
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//!
//! [dial]
//! radius = 120
//! count = 1
//!
//! [rotation]
//! step = 15
//! inertia = 0.9
//! minimal_speed = 0.001
//! minimal_angle_change = 0.1
//! step_transition_time = 120
//! step_transition_easing = cubic-out
//! angle = 0
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::engine::options::RotationOptions;
use crate::error::{Error, Result};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_DIAL_RADIUS: f32 = 120.0;
const DEFAULT_DIAL_COUNT: u32 = 1;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Demo configuration resource.
///
/// Stores window settings, dial layout, and the rotation options every dial
/// is built from.
#[derive(Resource, Debug, Clone)]
pub struct DemoConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Grab radius of each dial in pixels.
    pub dial_radius: f32,
    /// Number of dials laid out side by side.
    pub dial_count: u32,
    /// Options shared by all dials. A zero pivot is replaced by the dial's
    /// layout position.
    pub rotation: RotationOptions,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            dial_radius: DEFAULT_DIAL_RADIUS,
            dial_count: DEFAULT_DIAL_COUNT,
            rotation: RotationOptions::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| Error::Config(format!("Failed to load config file: {}", e)))?;
        self.apply(&config)?;

        info!(
            "Loaded config: {}x{} window, fps={}, {} dial(s) r={}, step={}, inertia={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.dial_count,
            self.dial_radius,
            self.rotation.step,
            self.rotation.inertia
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<()> {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [dial] section
        if let Some(radius) = config.getfloat("dial", "radius").ok().flatten() {
            self.dial_radius = radius as f32;
        }
        if let Some(count) = config.getuint("dial", "count").ok().flatten() {
            self.dial_count = count.max(1) as u32;
        }

        // [rotation] section
        let rotation = &mut self.rotation;
        if let Some(step) = float(config, "step")? {
            rotation.step = step;
        }
        if let Some(inertia) = float(config, "inertia")? {
            rotation.inertia = inertia;
        }
        if let Some(minimal_speed) = float(config, "minimal_speed")? {
            rotation.minimal_speed = minimal_speed;
        }
        if let Some(minimal_angle_change) = float(config, "minimal_angle_change")? {
            rotation.minimal_angle_change = Some(minimal_angle_change);
        }
        if let Some(time) = float(config, "step_transition_time")? {
            rotation.step_transition_time = time;
        }
        if let Some(easing) = config.get("rotation", "step_transition_easing") {
            rotation.step_transition_easing = easing;
        }
        if let Some(angle) = float(config, "angle")? {
            rotation.angle = angle;
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        self.save_to(&self.config_path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [dial] section
        config.set("dial", "radius", Some(self.dial_radius.to_string()));
        config.set("dial", "count", Some(self.dial_count.to_string()));

        // [rotation] section
        let rotation = &self.rotation;
        config.set("rotation", "step", Some(rotation.step.to_string()));
        config.set("rotation", "inertia", Some(rotation.inertia.to_string()));
        config.set(
            "rotation",
            "minimal_speed",
            Some(rotation.minimal_speed.to_string()),
        );
        if let Some(minimal_angle_change) = rotation.minimal_angle_change {
            config.set(
                "rotation",
                "minimal_angle_change",
                Some(minimal_angle_change.to_string()),
            );
        }
        config.set(
            "rotation",
            "step_transition_time",
            Some(rotation.step_transition_time.to_string()),
        );
        config.set(
            "rotation",
            "step_transition_easing",
            Some(rotation.step_transition_easing.clone()),
        );
        config.set("rotation", "angle", Some(rotation.angle.to_string()));

        config.write(path)?;

        info!("Saved config to {:?}", path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Options for dial `index`, with the pivot placed in the dial's slot
    /// unless the configuration names one.
    pub fn dial_options(&self, index: u32) -> RotationOptions {
        let mut options = self.rotation.clone();
        if options.cx == 0.0 && options.cy == 0.0 {
            let slot = f64::from(self.window_width) / f64::from(self.dial_count.max(1));
            options.cx = slot * (f64::from(index) + 0.5);
            options.cy = f64::from(self.window_height) / 2.0;
        }
        options
    }
}

/// Read a float from the `[rotation]` section. Present but unparsable values
/// are an error rather than silently ignored.
fn float(config: &Ini, key: &str) -> Result<Option<f64>> {
    config
        .getfloat("rotation", key)
        .map_err(|e| Error::Config(format!("[rotation] {}: {}", key, e)))
}
