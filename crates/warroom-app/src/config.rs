//! Command-line configuration and startup errors.
//!
//! A fleet is either loaded from `--fleet <file.json>` or built from the
//! uniform sizing flags. Identity, origin, scatter and seed flags override
//! whatever the file says.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use warroom_core::constants::{MISSION_FADE_TICKS, TICK_MILLIS};
use warroom_core::types::GeoPosition;
use warroom_sim::config::{EngineConfig, FleetConfig, FleetConfigError};
use warroom_sim::profiles::{ProfileError, ProgressProfileTable};

use crate::transport::ConnectError;

/// Command-center endpoint the ground station dials by default.
pub const DEFAULT_COMMAND_CENTER_URL: &str = "ws://127.0.0.1:55688/Third";

/// WARROOM ground station: swarm attack-mission allocation and execution.
#[derive(Debug, Clone, Parser)]
#[command(name = "warroom", version, about)]
pub struct Cli {
    /// WebSocket endpoint of the command center.
    #[arg(long, default_value = DEFAULT_COMMAND_CENTER_URL)]
    pub url: String,

    /// Milliseconds per simulation tick.
    #[arg(long, default_value_t = TICK_MILLIS)]
    pub tick_ms: u64,

    /// System uid reported in fleet telemetry.
    #[arg(long)]
    pub system_uid: Option<String>,

    /// Number of swarms (ignored with --fleet).
    #[arg(long, default_value_t = 1)]
    pub swarms: u32,

    /// Vehicles per swarm, leader included (ignored with --fleet).
    #[arg(long, default_value_t = 2)]
    pub vehicles_per_swarm: u32,

    /// Guided bombs per vehicle (ignored with --fleet).
    #[arg(long, default_value_t = 2)]
    pub guided: u32,

    /// Gravity bombs per vehicle (ignored with --fleet).
    #[arg(long, default_value_t = 2)]
    pub gravity: u32,

    /// Staging position as `lat,lon,alt`.
    #[arg(long, value_parser = parse_origin, allow_hyphen_values = true)]
    pub origin: Option<GeoPosition>,

    /// Start-position scatter around the origin, in degrees.
    #[arg(long)]
    pub scatter: Option<f64>,

    /// Seed for start positions.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fleet description (JSON).
    #[arg(long)]
    pub fleet: Option<PathBuf>,

    /// Ticks a finished or canceled mission stays visible.
    #[arg(long, default_value_t = MISSION_FADE_TICKS, allow_negative_numbers = true)]
    pub fade_ticks: i32,

    /// Progress profile table (JSON array of `{step, leadThreshold}`).
    #[arg(long)]
    pub profiles: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fleet(#[from] FleetConfigError),
    #[error("failed to read progress profiles from {path:?}: {source}")]
    ProfilesRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Profiles(#[from] ProfileError),
    #[error("tick period must be positive")]
    ZeroTick,
    #[error("fade ticks must not be negative (got {0})")]
    NegativeFade(i32),
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("game loop thread panicked")]
    LoopPanicked,
}

impl Cli {
    /// Fleet from `--fleet` or from the sizing flags, with overrides applied.
    pub fn fleet_config(&self) -> Result<FleetConfig, AppError> {
        let mut config = match &self.fleet {
            Some(path) => FleetConfig::from_file(path)?,
            None => FleetConfig::uniform(
                self.swarms,
                self.vehicles_per_swarm,
                self.guided,
                self.gravity,
            ),
        };

        if let Some(system_uid) = &self.system_uid {
            config.system_uid = system_uid.clone();
        }
        if let Some(origin) = self.origin {
            config.origin = origin;
        }
        if let Some(scatter) = self.scatter {
            config.scatter_deg = scatter;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn engine_config(&self) -> Result<EngineConfig, AppError> {
        if self.fade_ticks < 0 {
            return Err(AppError::NegativeFade(self.fade_ticks));
        }
        let profiles = match &self.profiles {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|source| AppError::ProfilesRead {
                    path: path.clone(),
                    source,
                })?;
                ProgressProfileTable::from_json_str(&json)?
            }
            None => ProgressProfileTable::default(),
        };
        Ok(EngineConfig {
            profiles,
            fade_ticks: self.fade_ticks,
        })
    }

    pub fn tick_duration(&self) -> Result<Duration, AppError> {
        if self.tick_ms == 0 {
            return Err(AppError::ZeroTick);
        }
        Ok(Duration::from_millis(self.tick_ms))
    }
}

/// Parse `lat,lon,alt`.
fn parse_origin(value: &str) -> Result<GeoPosition, String> {
    let parts: Vec<f64> = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid coordinate in {value:?}: {e}"))?;
    match parts.as_slice() {
        &[lat, lon, alt] => Ok(GeoPosition::new(lat, lon, alt)),
        _ => Err(format!("expected lat,lon,alt, got {value:?}")),
    }
}
