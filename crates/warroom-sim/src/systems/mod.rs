//! Systems that advance the fleet and the mission each tick.
//!
//! Systems are plain functions over the fleet's world and the mission
//! queues. They do not own state.

pub mod movement;
pub mod progress;
pub mod snapshot;
pub mod strike;
