//! ECS components for hecs vehicle entities.
//!
//! Components are plain data structs. Mission logic lives in the
//! simulation crate's systems, not here.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::PayloadType;

/// Vehicle identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airframe {
    pub vehicle_uid: String,
    /// Airframe kind reported in telemetry ("copter", "fixed-wing", ...).
    pub kind: String,
    /// Creation order across the whole fleet.
    pub serial: u32,
}

/// Swarm membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwarmMember {
    pub swarm_uid: String,
    /// Position of the swarm in creation order.
    pub swarm_index: usize,
    pub is_leader: bool,
}

/// One payload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(rename = "type")]
    pub payload_type: PayloadType,
    pub amount: u32,
}

/// Ordered payload slots carried by a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadBay {
    pub payloads: Vec<Payload>,
}

/// Movement applied to the vehicle on the current tick (dLat, dLon, dAlt).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveStep {
    pub delta: DVec3,
}

impl Payload {
    pub fn new(payload_type: PayloadType, amount: u32) -> Self {
        Self {
            payload_type,
            amount,
        }
    }
}

impl PayloadBay {
    /// Total amount carried of one payload type.
    pub fn stock(&self, payload_type: PayloadType) -> u64 {
        self.payloads
            .iter()
            .filter(|p| p.payload_type == payload_type)
            .map(|p| u64::from(p.amount))
            .sum()
    }
}
