//! Demo systems.
//!
//! Submodules overview
//! - [`pointer`] – read the mouse into [`crate::resources::pointer::PointerState`] and drive gestures
//! - [`render`] – draw dials and the debug overlay using Raylib
//! - [`rotation`] – tick each dial's engine and re-emit its notifications
//! - [`time`] – update simulation time and delta
//! - [`tween`] – ease the displayed angle between steps

pub mod pointer;
pub mod render;
pub mod rotation;
pub mod time;
pub mod tween;
