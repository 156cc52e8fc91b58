//! Mission lifecycle state machine.
//!
//! ```text
//! none --assign--> ready --engage--> engaging --progress 100--> completed
//! ready | engaging --terminate--> canceled
//! completed --terminate--> finished
//! completed | finished | canceled --fade--> none
//! ```
//!
//! Transitions are pure functions over the mission slot. Commands that do
//! not apply are answered with a `Rejection` and change nothing.

use tracing::info;

use warroom_core::constants::PROGRESS_MAX;
use warroom_core::enums::MissionState;

use crate::error::Rejection;
use crate::mission::Mission;

/// How an assign command meets the mission slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignGate {
    /// Slot is free: audit and allocate.
    Open,
    /// Same mission is already active: acknowledge without changes.
    Reacknowledge,
}

/// Decide whether an assign may proceed.
pub fn gate_assign(mission: &Mission, mission_uid: &str) -> Result<AssignGate, Rejection> {
    match mission.mission_uid.as_deref() {
        None => Ok(AssignGate::Open),
        Some(active) if active == mission_uid => Ok(AssignGate::Reacknowledge),
        Some(_) => Err(Rejection::Busy),
    }
}

/// `ready --engage--> engaging`. Re-engaging an engaging mission is a no-op.
pub fn engage(mission: &mut Mission, mission_uid: &str) -> Result<(), Rejection> {
    require_active(mission, mission_uid)?;
    match mission.state {
        MissionState::Ready => {
            transition(mission, MissionState::Engaging);
            Ok(())
        }
        MissionState::Engaging => Ok(()),
        state => Err(Rejection::InvalidTransition {
            command: "engage",
            state,
        }),
    }
}

/// Cancel an unfinished mission, or finish a completed one.
pub fn terminate(mission: &mut Mission, mission_uid: &str) -> Result<(), Rejection> {
    require_active(mission, mission_uid)?;
    match mission.state {
        MissionState::Ready | MissionState::Engaging => {
            transition(mission, MissionState::Canceled);
            Ok(())
        }
        MissionState::Completed => {
            transition(mission, MissionState::Finished);
            Ok(())
        }
        MissionState::Finished | MissionState::Canceled => Ok(()),
        state => Err(Rejection::InvalidTransition {
            command: "terminate",
            state,
        }),
    }
}

/// `engaging --progress 100--> completed`.
pub fn observe_progress(mission: &mut Mission) {
    if mission.state == MissionState::Engaging && mission.progress >= PROGRESS_MAX {
        transition(mission, MissionState::Completed);
    }
}

/// Count down a terminal mission. Returns `true` when the slot was freed.
pub fn fade(mission: &mut Mission, fade_ticks: i32) -> bool {
    if !mission.state.is_terminal() {
        return false;
    }
    mission.fade -= 1;
    if mission.fade >= 0 {
        return false;
    }
    info!(
        mission_uid = mission.mission_uid.as_deref().unwrap_or("-"),
        state = %mission.state,
        "mission released"
    );
    mission.clear(fade_ticks);
    true
}

fn require_active(mission: &Mission, mission_uid: &str) -> Result<(), Rejection> {
    match mission.mission_uid.as_deref() {
        None => Err(Rejection::NoActiveMission),
        Some(active) if active == mission_uid => Ok(()),
        Some(_) => Err(Rejection::Busy),
    }
}

fn transition(mission: &mut Mission, next: MissionState) {
    info!(
        mission_uid = mission.mission_uid.as_deref().unwrap_or("-"),
        from = %mission.state,
        to = %next,
        "mission state changed"
    );
    mission.state = next;
}
