//! Mission commands sent by the command center to the fleet.
//!
//! Every command yields exactly one `CommandReply`.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GeoPosition;

/// All commands the command center can issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum MissionCommand {
    /// Validate and allocate a new mission against the fleet.
    Assign {
        #[serde(rename = "missionUid")]
        mission_uid: String,
        targets: Vec<AttackTarget>,
    },
    /// Start executing a ready mission.
    Engage {
        #[serde(rename = "missionUid")]
        mission_uid: String,
    },
    /// Stop the mission (canceled) or acknowledge its completion (finished).
    Terminate {
        #[serde(rename = "missionUid")]
        mission_uid: String,
    },
}

/// One attack target inside an assign command. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackTarget {
    pub action: AttackAction,
    /// Free-form target category (vehicle, building, ...).
    #[serde(rename = "type", default)]
    pub target_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPosition>,
    /// Requested ordnance count. Signed so that negative requests can be rejected.
    pub count: i64,
}

impl MissionCommand {
    pub fn mission_uid(&self) -> &str {
        match self {
            MissionCommand::Assign { mission_uid, .. }
            | MissionCommand::Engage { mission_uid }
            | MissionCommand::Terminate { mission_uid } => mission_uid,
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            MissionCommand::Assign { .. } => CommandKind::Assign,
            MissionCommand::Engage { .. } => CommandKind::Engage,
            MissionCommand::Terminate { .. } => CommandKind::Terminate,
        }
    }
}

impl AttackTarget {
    /// Convenience constructor for a positioned target.
    pub fn new(
        action: impl Into<AttackAction>,
        target_uid: impl Into<String>,
        position: GeoPosition,
        count: i64,
    ) -> Self {
        Self {
            action: action.into(),
            target_type: String::new(),
            target_uid: Some(target_uid.into()),
            position: Some(position),
            count,
        }
    }
}
