//! Command rejections.
//!
//! Every rejection is reported to the command center as the description of
//! a "rejected" reply. None of them mutates fleet or mission state.

use thiserror::Error;

use warroom_core::enums::{MissionState, PayloadType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Target position missing")]
    MissingPosition,
    #[error("Attack count invalid")]
    InvalidCount,
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
    #[error("Insufficient {payload} ordnance: requested {requested}, available {available}")]
    InsufficientCapacity {
        payload: PayloadType,
        requested: i64,
        available: u64,
    },
    #[error("System is busy.")]
    Busy,
    #[error("No active mission")]
    NoActiveMission,
    #[error("Mission cannot {command} while {state}")]
    InvalidTransition {
        command: &'static str,
        state: MissionState,
    },
}
