//! Fleet composition and engine tuning.
//!
//! The fleet is described once at startup, either built from command-line
//! flags or loaded from a JSON file, and is immutable input to the engine.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use warroom_core::components::Payload;
use warroom_core::constants::*;
use warroom_core::enums::PayloadType;
use warroom_core::types::GeoPosition;

use crate::profiles::ProgressProfileTable;

/// Fleet composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FleetConfig {
    /// Identity of this ground-station system in telemetry.
    pub system_uid: String,
    pub vehicle_kind: String,
    pub vehicle_prefix: String,
    pub swarm_prefix: String,
    /// Staging position all vehicles start around.
    pub origin: GeoPosition,
    /// Maximum start offset from the origin, in degrees. Zero stacks every
    /// vehicle exactly on the origin.
    pub scatter_deg: f64,
    /// RNG seed for start positions. Same seed = same fleet.
    pub seed: u64,
    pub swarms: Vec<SwarmSpec>,
}

/// One swarm: its size and per-vehicle loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwarmSpec {
    /// Vehicle count, leader included.
    pub vehicles: u32,
    /// Loadout of every wingman (and of the leader unless overridden).
    #[serde(default)]
    pub payloads: Vec<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_payloads: Option<Vec<Payload>>,
}

/// Engine tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub profiles: ProgressProfileTable,
    /// Ticks a terminal mission stays visible before its id is released.
    pub fade_ticks: i32,
}

#[derive(Debug, Error)]
pub enum FleetConfigError {
    #[error("failed to parse fleet config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read fleet config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("fleet config defines no swarms")]
    NoSwarms,
    #[error("swarm {index} has no vehicles")]
    EmptySwarm { index: usize },
    #[error("scatter must be a finite, non-negative number of degrees (got {0})")]
    InvalidScatter(f64),
    #[error("origin must be finite")]
    InvalidOrigin,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self::uniform(1, 2, 2, 2)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profiles: ProgressProfileTable::default(),
            fade_ticks: MISSION_FADE_TICKS,
        }
    }
}

impl FleetConfig {
    /// `swarm_count` identical swarms of `vehicles_per_swarm` vehicles, each
    /// vehicle carrying `guided` guided and `gravity` gravity bombs.
    pub fn uniform(swarm_count: u32, vehicles_per_swarm: u32, guided: u32, gravity: u32) -> Self {
        let payloads = vec![
            Payload::new(PayloadType::GuidedBomb, guided),
            Payload::new(PayloadType::GravityBomb, gravity),
        ];
        Self {
            system_uid: "warroom".into(),
            vehicle_kind: DEFAULT_VEHICLE_KIND.into(),
            vehicle_prefix: DEFAULT_VEHICLE_PREFIX.into(),
            swarm_prefix: DEFAULT_SWARM_PREFIX.into(),
            origin: GeoPosition::from(DEFAULT_ORIGIN),
            scatter_deg: DEFAULT_SCATTER_DEG,
            seed: 42,
            swarms: (0..swarm_count)
                .map(|_| SwarmSpec {
                    vehicles: vehicles_per_swarm,
                    payloads: payloads.clone(),
                    leader_payloads: None,
                })
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, FleetConfigError> {
        let config: FleetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, FleetConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| FleetConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), FleetConfigError> {
        if self.swarms.is_empty() {
            return Err(FleetConfigError::NoSwarms);
        }
        if let Some(index) = self.swarms.iter().position(|s| s.vehicles == 0) {
            return Err(FleetConfigError::EmptySwarm { index });
        }
        if !self.scatter_deg.is_finite() || self.scatter_deg < 0.0 {
            return Err(FleetConfigError::InvalidScatter(self.scatter_deg));
        }
        let origin = self.origin;
        if !(origin.lat.is_finite() && origin.lon.is_finite() && origin.alt.is_finite()) {
            return Err(FleetConfigError::InvalidOrigin);
        }
        Ok(())
    }

    pub fn vehicle_count(&self) -> u32 {
        self.swarms.iter().map(|s| s.vehicles).sum()
    }
}

impl SwarmSpec {
    /// Loadout for the vehicle at `slot` within the swarm (slot 0 leads).
    pub fn loadout(&self, slot: u32) -> &[Payload] {
        match (&self.leader_payloads, slot) {
            (Some(leader), 0) => leader,
            _ => &self.payloads,
        }
    }
}
