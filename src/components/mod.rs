//! ECS components for dial entities.
//!
//! Submodules overview:
//! - [`rotatable`] – a rotation engine attached to an entity, plus its grab radius
//! - [`rotation`] – displayed rotation angle in degrees
//! - [`tween`] – eased interpolation of the displayed angle between steps

pub mod rotatable;
pub mod rotation;
pub mod tween;
