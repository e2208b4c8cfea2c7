//! Slingfort: a 2D physics puzzle about knocking down wooden forts.
//!
//! Launch projectiles from a slingshot at destructible structures to crush
//! the targets hiding inside. Built on Bevy with Rapier for rigid-body
//! simulation; the crate's own modules cover the damage rules, the level
//! catalogue, the slingshot controller, and the session state machine.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod projectile;
pub mod rendering;
pub mod session;
pub mod slingshot;
pub mod structure;
pub mod target;
