//! ECS events.
//!
//! Submodules overview:
//! - [`rotation`] – engine notifications re-emitted per dial entity
//! - [`switchdebug`] – toggle the debug overlay

pub mod rotation;
pub mod switchdebug;
