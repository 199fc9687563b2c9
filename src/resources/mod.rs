//! ECS resources shared across systems.
//!
//! Submodules overview:
//! - [`debugmode`] – marker resource enabling the debug overlay
//! - [`democonfig`] – window, dial and rotation settings loaded from INI
//! - [`pointer`] – per-frame pointer position and button state
//! - [`worldtime`] – elapsed/delta time and frame counter

pub mod debugmode;
pub mod democonfig;
pub mod pointer;
pub mod worldtime;
