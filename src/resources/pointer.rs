//! Per-frame pointer input resource.
//!
//! Captures the mouse state the drag system needs and exposes it via the
//! [`PointerState`] resource. Tests and the replay driver can fill it by hand
//! instead of polling raylib.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Pressed/released state of the primary pointer button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Whether the button is held this frame.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl ButtonState {
    /// Derive the edges from the previous held flag.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the pointer position and button for this frame.
#[derive(Resource, Debug, Clone)]
pub struct PointerState {
    /// Pointer position in screen pixels.
    pub position: Vector2,
    pub button: ButtonState,
    pub button_binding: MouseButton,
    /// Key that toggles the debug overlay.
    pub debug_binding: KeyboardKey,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vector2 { x: 0.0, y: 0.0 },
            button: ButtonState::default(),
            button_binding: MouseButton::MOUSE_BUTTON_LEFT,
            debug_binding: KeyboardKey::KEY_F11,
        }
    }
}

impl PointerState {
    /// Move the pointer and set the button, deriving press/release edges.
    pub fn set(&mut self, x: f32, y: f32, down: bool) {
        self.position = Vector2 { x, y };
        self.button.update(down);
    }
}
