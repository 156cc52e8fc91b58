//! Messages flowing between the transport threads and the game loop thread.

use warroom_core::commands::MissionCommand;
use warroom_core::events::{AttackEvent, CommandReply};
use warroom_core::state::{FleetStatus, MissionStatus};

use crate::envelope::{self, Envelope, EnvelopeError};

/// Commands sent from the transport reader to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A mission command to hand to the engine.
    Mission(MissionCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Everything the game loop publishes to the command center.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Reply(CommandReply),
    Status(MissionStatus),
    Attack(AttackEvent),
    Fleet(FleetStatus),
}

impl Outbound {
    /// Envelope `type` for this message.
    pub fn message_type(&self) -> &'static str {
        match self {
            Outbound::Reply(_) => envelope::MISSION_REPLY,
            Outbound::Status(_) => envelope::MISSION_STATUS,
            Outbound::Attack(_) => envelope::ATTACK_EVENT,
            Outbound::Fleet(_) => envelope::DGS_STATUS,
        }
    }

    pub fn to_envelope(&self) -> Result<Envelope, EnvelopeError> {
        let message_type = self.message_type();
        match self {
            Outbound::Reply(reply) => Envelope::wrap(message_type, reply),
            Outbound::Status(status) => Envelope::wrap(message_type, status),
            Outbound::Attack(event) => Envelope::wrap(message_type, event),
            Outbound::Fleet(fleet) => Envelope::wrap(message_type, fleet),
        }
    }
}
