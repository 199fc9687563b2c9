//! Rotary: drag-to-rotate dials.
//!
//! [`engine`] holds the framework-independent rotation engine. The remaining
//! modules host it inside a bevy ECS world with a raylib window, and
//! [`replay`] runs it headless against a recorded gesture.

pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod replay;
pub mod resources;
pub mod systems;
