//! Messages emitted by the simulation: command replies and attack events.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Synchronous answer to a `MissionCommand`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReply {
    pub reply_command: CommandKind,
    pub mission_uid: String,
    pub reply: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Ordnance released by one vehicle against one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackEvent {
    pub mission_uid: String,
    pub vehicle_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_uid: Option<String>,
    /// Rounds released. Omitted for a single round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl CommandReply {
    pub fn accepted(reply_command: CommandKind, mission_uid: impl Into<String>) -> Self {
        Self {
            reply_command,
            mission_uid: mission_uid.into(),
            reply: ReplyStatus::Accepted,
            description: None,
        }
    }

    pub fn rejected(
        reply_command: CommandKind,
        mission_uid: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            reply_command,
            mission_uid: mission_uid.into(),
            reply: ReplyStatus::Rejected,
            description: Some(description.into()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.reply == ReplyStatus::Accepted
    }
}

impl AttackEvent {
    /// Number of rounds this event stands for.
    pub fn rounds(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}
