use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::rotatable::Rotatable;
use crate::components::rotation::Rotation;
use crate::resources::debugmode::DebugMode;

/// Draw every dial, plus the debug overlay when [`DebugMode`] is present.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    debug: Option<Res<DebugMode>>,
    query: Query<(&Rotatable, &Rotation)>,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::RAYWHITE);

    for (dial, rotation) in query.iter() {
        render_dial(&mut d, dial, rotation);
    }

    if debug.is_some() {
        render_debug_ui(&mut d, &query);
    }
}

/// Rim, step ticks and a needle pointing along the displayed angle.
fn render_dial(d: &mut RaylibDrawHandle, dial: &Rotatable, rotation: &Rotation) {
    let state = dial.engine.state();
    let center = Vector2::new(state.cx as f32, state.cy as f32);
    let radius = dial.radius;

    let rim = if state.active { Color::DARKBLUE } else { Color::GRAY };
    d.draw_circle_v(center, radius, Color::LIGHTGRAY);
    d.draw_circle_lines(center.x as i32, center.y as i32, radius, rim);

    if state.is_stepped() {
        let ticks = (360.0 / state.step).floor() as u32;
        for i in 0..ticks {
            let (x, y) = Rotation::new((f64::from(i) * state.step) as f32).direction();
            let outer = Vector2::new(center.x + x * radius, center.y + y * radius);
            let inner = Vector2::new(center.x + x * radius * 0.9, center.y + y * radius * 0.9);
            d.draw_line_v(inner, outer, Color::DARKGRAY);
        }
    }

    let (x, y) = rotation.direction();
    let tip = Vector2::new(center.x + x * radius * 0.8, center.y + y * radius * 0.8);
    d.draw_line_ex(center, tip, 4.0, Color::MAROON);
    d.draw_circle_v(center, 6.0, Color::MAROON);
}

pub fn render_debug_ui(d: &mut RaylibDrawHandle, query: &Query<(&Rotatable, &Rotation)>) {
    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, 10, 10, Color::BLACK);

    for (dial, rotation) in query.iter() {
        let state = dial.engine.state();
        let lines = [
            format!("angle {:.2} (shown {:.2})", state.angle, rotation.degrees),
            format!("virtual {:.2}", state.virtual_angle),
            format!("speed {:.3} dir {}", state.speed, state.direction.value()),
            format!(
                "{}{}",
                if state.active { "dragging " } else { "" },
                if state.transiting { "transiting" } else { "" }
            ),
        ];

        let x = (state.cx as f32 - dial.radius) as i32;
        let mut y = (state.cy as f32 + dial.radius) as i32 + 8;
        for line in &lines {
            d.draw_text(line, x, y, 10, Color::BLACK);
            y += 12;
        }
    }
}
