//! Wire envelope for every message exchanged with the command center.
//!
//! One envelope per WebSocket text frame: `{uid, timestamp, type, data}` as
//! JSON. `data` carries the typed payload named by `type`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use warroom_core::commands::MissionCommand;

/// Inbound mission command.
pub const MISSION_COMMAND: &str = "missionCommand";
/// Reply to a mission command.
pub const MISSION_REPLY: &str = "missionReply";
/// Per-tick mission status.
pub const MISSION_STATUS: &str = "missionStatus";
/// Ordnance released by one vehicle.
pub const ATTACK_EVENT: &str = "attackEvent";
/// Per-tick fleet telemetry.
pub const DGS_STATUS: &str = "dgsStatus";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Message id. Senders that omit it get the nil uuid.
    #[serde(default)]
    pub uid: Uuid,
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected message type {0:?}")]
    UnexpectedType(String),
}

impl Envelope {
    /// Wrap a payload in a fresh envelope stamped with the current time.
    pub fn wrap<T: Serialize>(message_type: &str, data: &T) -> Result<Self, EnvelopeError> {
        Ok(Self {
            uid: Uuid::new_v4(),
            timestamp: Utc::now(),
            message_type: message_type.to_owned(),
            data: serde_json::to_value(data)?,
        })
    }

    /// Parse one frame of input.
    pub fn decode(text: &str) -> Result<Self, EnvelopeError> {
        Ok(serde_json::from_str(text.trim())?)
    }

    /// Serialize as the payload of one text frame.
    pub fn encode(&self) -> Result<String, EnvelopeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Extract the mission command carried by a `missionCommand` envelope.
    pub fn into_command(self) -> Result<MissionCommand, EnvelopeError> {
        if self.message_type != MISSION_COMMAND {
            return Err(EnvelopeError::UnexpectedType(self.message_type));
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warroom_core::enums::CommandKind;
    use warroom_core::events::CommandReply;

    #[test]
    fn test_decode_mission_command() {
        let line = r#"{"uid":"8d3c6a4e-3f8e-4b59-9d2a-0a3b5c7d9e11",
            "timestamp":"2026-03-01T08:00:00Z","type":"missionCommand",
            "data":{"command":"terminate","missionUid":"m1"}}"#;
        let envelope = Envelope::decode(line).unwrap();
        assert_eq!(envelope.message_type, MISSION_COMMAND);
        assert_eq!(
            envelope.into_command().unwrap(),
            MissionCommand::Terminate {
                mission_uid: "m1".into()
            }
        );
    }

    #[test]
    fn test_decode_tolerates_missing_uid_and_timestamp() {
        let line = r#"{"type":"missionCommand","data":{"command":"engage","missionUid":"m9"}}"#;
        let envelope = Envelope::decode(line).unwrap();
        assert!(envelope.uid.is_nil());
        assert_eq!(envelope.into_command().unwrap().mission_uid(), "m9");
    }

    #[test]
    fn test_rejects_wrong_type_and_garbage() {
        let envelope = Envelope::decode(r#"{"type":"dgsStatus","data":{}}"#).unwrap();
        assert!(matches!(
            envelope.into_command(),
            Err(EnvelopeError::UnexpectedType(t)) if t == "dgsStatus"
        ));
        assert!(Envelope::decode("not json").is_err());

        let unknown = r#"{"type":"missionCommand","data":{"command":"fly"}}"#;
        let envelope = Envelope::decode(unknown).unwrap();
        assert!(matches!(envelope.into_command(), Err(EnvelopeError::Json(_))));
    }

    #[test]
    fn test_encode_shape() {
        let reply = CommandReply::accepted(CommandKind::Engage, "m1");
        let envelope = Envelope::wrap(MISSION_REPLY, &reply).unwrap();
        assert!(!envelope.uid.is_nil());

        let text = envelope.encode().unwrap();
        assert!(!text.contains('\n'));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "missionReply");
        assert_eq!(value["data"]["replyCommand"], "engage");
        assert_eq!(value["data"]["reply"], "accepted");
        assert!(value["timestamp"].is_string());
        assert_eq!(Envelope::decode(&text).unwrap(), envelope);
    }
}
