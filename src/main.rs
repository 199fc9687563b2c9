//! Rotary demo binary.
//!
//! Opens a raylib window with one or more dials that can be dragged around
//! their pivot, or, with `--replay`, runs a recorded gesture headless and
//! prints every notification as a JSON line.

use std::path::{Path, PathBuf};
use std::process;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use rotary::components::rotatable::Rotatable;
use rotary::components::rotation::Rotation;
use rotary::engine::options::RotationOptions;
use rotary::events::rotation::log_rotation_observer;
use rotary::events::switchdebug::switch_debug_observer;
use rotary::replay::{Recording, replay, write_lines};
use rotary::resources::democonfig::DemoConfig;
use rotary::resources::pointer::PointerState;
use rotary::resources::worldtime::WorldTime;
use rotary::systems::pointer::{drag_rotation_system, update_input_state};
use rotary::systems::render::render_system;
use rotary::systems::rotation::rotation_tick_system;
use rotary::systems::time::update_world_time;
use rotary::systems::tween::tween_rotation_system;

/// Drag-to-rotate dials
#[derive(Parser)]
#[command(version, about = "Drag-to-rotate dials with stepping and inertia.")]
struct Cli {
    /// INI file with window, dial and rotation settings.
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// JSON file with rotation options; replaces the [rotation] section.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Quantize the angle to multiples of this many degrees.
    #[arg(long)]
    step: Option<f64>,

    /// Momentum kept per frame after release, in [0, 1).
    #[arg(long)]
    inertia: Option<f64>,

    /// Replay a recorded gesture without a window and print the notifications.
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,
}

impl Cli {
    /// Apply `--options`, `--step` and `--inertia` on top of `base`.
    fn rotation_options(&self, base: RotationOptions) -> rotary::error::Result<RotationOptions> {
        let mut options = match &self.options {
            Some(path) => RotationOptions::from_json_file(path)?,
            None => base,
        };
        if let Some(step) = self.step {
            options.step = step;
        }
        if let Some(inertia) = self.inertia {
            options.inertia = inertia;
        }
        Ok(options)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: replay a recording and quit (no window needed)
    if let Some(path) = &cli.replay {
        if let Err(e) = run_replay(&cli, path) {
            error!("Replay failed: {e}");
            process::exit(1);
        }
        return;
    }

    let mut config = DemoConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }
    match cli.rotation_options(config.rotation.clone()) {
        Ok(options) => config.rotation = options,
        Err(e) => {
            error!("Invalid rotation options: {e}");
            process::exit(1);
        }
    }

    run_window(config);
}

fn run_replay(cli: &Cli, path: &Path) -> rotary::error::Result<()> {
    let mut recording = Recording::from_json_file(path)?;
    recording.options = cli.rotation_options(recording.options)?;
    let lines = replay(&recording)?;
    write_lines(&lines, std::io::stdout().lock())
}

fn run_window(config: DemoConfig) {
    info!("Starting rotary demo");

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .title("Rotary")
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(PointerState::default());

    for index in 0..config.dial_count {
        match Rotatable::new(config.dial_options(index), config.dial_radius) {
            Ok(dial) => {
                let shown = dial.engine.angle() as f32;
                world.spawn((dial, Rotation::new(shown)));
            }
            Err(e) => {
                error!("Invalid rotation options for dial {index}: {e}");
                process::exit(1);
            }
        }
    }
    world.insert_resource(config);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(log_rotation_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(drag_rotation_system.after(update_input_state));
    update.add_systems(rotation_tick_system.after(drag_rotation_system));
    update.add_systems(tween_rotation_system.after(rotation_tick_system));
    update.add_systems(render_system.after(tween_rotation_system));

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {e}");
        process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }
}
