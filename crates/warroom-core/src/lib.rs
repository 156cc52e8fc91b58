//! Core types and definitions for the WARROOM swarm simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, replies, events, status snapshots and constants.
//! It has no dependency on the transport or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
