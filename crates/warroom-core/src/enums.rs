//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordnance or equipment carried in a vehicle payload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadType {
    /// Precision-guided bomb, expended by "snipe" legs.
    GuidedBomb,
    /// Unguided gravity bomb, expended by "bombard" legs.
    GravityBomb,
    /// Anything else (sensors, cameras). Never counted as ordnance.
    #[serde(other)]
    Other,
}

/// Requested attack action, as named by the command center.
///
/// Travels as a plain string; unknown actions are kept verbatim so they
/// can be named in the rejection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttackAction {
    /// Precision strike with guided ordnance.
    Snipe,
    /// Area strike with gravity ordnance.
    Bombard,
    /// Not supported by this fleet.
    Unsupported(String),
}

/// Mission lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionState {
    #[default]
    None,
    Ready,
    Engaging,
    Completed,
    Finished,
    Canceled,
}

/// Command kind echoed back in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Assign,
    Engage,
    Terminate,
}

/// Outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Accepted,
    Rejected,
}

impl AttackAction {
    /// Payload type expended by this action, `None` for unsupported actions.
    pub fn payload_type(&self) -> Option<PayloadType> {
        match self {
            AttackAction::Snipe => Some(PayloadType::GuidedBomb),
            AttackAction::Bombard => Some(PayloadType::GravityBomb),
            AttackAction::Unsupported(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttackAction::Snipe => "snipe",
            AttackAction::Bombard => "bombard",
            AttackAction::Unsupported(name) => name,
        }
    }
}

impl From<String> for AttackAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "snipe" => AttackAction::Snipe,
            "bombard" => AttackAction::Bombard,
            _ => AttackAction::Unsupported(value),
        }
    }
}

impl From<&str> for AttackAction {
    fn from(value: &str) -> Self {
        AttackAction::from(value.to_owned())
    }
}

impl From<AttackAction> for String {
    fn from(action: AttackAction) -> Self {
        match action {
            AttackAction::Unsupported(name) => name,
            other => other.as_str().to_owned(),
        }
    }
}

impl fmt::Display for AttackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MissionState {
    /// Completed, finished or canceled: the mission is fading out.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MissionState::Completed | MissionState::Finished | MissionState::Canceled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MissionState::None => "none",
            MissionState::Ready => "ready",
            MissionState::Engaging => "engaging",
            MissionState::Completed => "completed",
            MissionState::Finished => "finished",
            MissionState::Canceled => "canceled",
        }
    }
}

impl fmt::Display for MissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadType::GuidedBomb => "guided",
            PayloadType::GravityBomb => "gravity",
            PayloadType::Other => "other",
        };
        f.write_str(name)
    }
}
