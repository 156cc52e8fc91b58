//! Mission allocation and execution engine for WARROOM.
//!
//! Owns the hecs fleet world, validates and allocates attack missions
//! across swarms, and steps mission progress at a fixed tick rate.

pub mod allocator;
pub mod capacity;
pub mod config;
pub mod demand;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod lifecycle;
pub mod mission;
pub mod profiles;
pub mod systems;
pub mod world_setup;

pub use engine::{MissionEngine, TickOutput};
pub use error::Rejection;
pub use warroom_core as core;

#[cfg(test)]
mod tests;
