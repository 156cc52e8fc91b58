//! Status snapshots broadcast to the command center each tick.

use serde::{Deserialize, Serialize};

use crate::enums::MissionState;
use crate::types::{GeoPosition, SimTime};

/// Mission status, emitted every tick while a mission is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionStatus {
    pub mission_uid: String,
    pub state: MissionState,
    /// Aggregate progress over all sub-missions (0 - 100).
    pub progress: u32,
    pub swarms: Vec<SwarmStatusView>,
}

/// Per-swarm part of the mission status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwarmStatusView {
    pub swarm_uid: String,
    /// Guided plus gravity rounds still carried by the swarm.
    pub remaining_ammunition: u64,
    /// Target of the sub-mission under the cursor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_target: Option<String>,
}

/// Raw fleet telemetry: every vehicle's position and role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatus {
    pub system_uid: String,
    /// Validity of this report, in ticks.
    pub ttl: u32,
    /// Engine clock at capture. Not sent on the wire.
    #[serde(skip)]
    pub time: SimTime,
    pub vehicles: Vec<VehicleView>,
}

/// One vehicle inside a `FleetStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub vehicle_uid: String,
    pub position: GeoPosition,
    #[serde(rename = "type")]
    pub kind: String,
    pub swarm_uid: String,
    pub is_leader: bool,
}
