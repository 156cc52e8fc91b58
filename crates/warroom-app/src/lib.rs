//! WARROOM ground-station application.
//!
//! This crate wires the mission engine to the command center: a game loop
//! thread owns the engine, and a WebSocket client link carries JSON
//! envelopes in both directions, one per text frame.

pub mod config;
pub mod envelope;
pub mod game_loop;
pub mod state;
pub mod transport;

pub use warroom_core as core;
