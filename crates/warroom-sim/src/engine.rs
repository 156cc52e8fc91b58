//! Mission engine: the core of the simulation.
//!
//! `MissionEngine` owns the fleet and the mission slot, answers commands,
//! runs all systems once per tick and produces status snapshots. Headless:
//! no transport dependency.
//!
//! The engine is meant to have a single owner. Commands and ticks are both
//! `&mut self` calls, so an assign is fully validated and committed before
//! any later tick can observe the mission.

use tracing::{debug, info};

use warroom_core::commands::{AttackTarget, MissionCommand};
use warroom_core::enums::MissionState;
use warroom_core::events::{AttackEvent, CommandReply};
use warroom_core::state::{FleetStatus, MissionStatus};
use warroom_core::types::{GeoPosition, SimTime};

use crate::allocator;
use crate::capacity::{self, FleetCapacity};
use crate::config::{EngineConfig, FleetConfig, FleetConfigError};
use crate::error::Rejection;
use crate::fleet::Fleet;
use crate::lifecycle::{self, AssignGate};
use crate::mission::Mission;
use crate::systems;
use crate::world_setup;

/// Everything one tick produced.
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub time: SimTime,
    /// Mission status, present while a mission occupies the slot.
    pub status: Option<MissionStatus>,
    /// Ordnance released this tick.
    pub attack_events: Vec<AttackEvent>,
}

/// The mission engine. Owns the fleet and the single mission slot.
pub struct MissionEngine {
    fleet: Fleet,
    mission: Mission,
    config: EngineConfig,
    time: SimTime,
}

impl MissionEngine {
    /// Create an engine over an already built fleet.
    pub fn new(fleet: Fleet, config: EngineConfig) -> Self {
        Self {
            fleet,
            mission: Mission::new(config.fade_ticks),
            config,
            time: SimTime::default(),
        }
    }

    /// Build the fleet from its configuration and create an engine over it.
    pub fn from_config(
        fleet_config: &FleetConfig,
        config: EngineConfig,
    ) -> Result<Self, FleetConfigError> {
        let fleet = world_setup::build_fleet(fleet_config)?;
        Ok(Self::new(fleet, config))
    }

    /// Handle one command and produce its reply.
    pub fn handle_command(&mut self, command: MissionCommand) -> CommandReply {
        let kind = command.kind();
        let result = match command {
            MissionCommand::Assign {
                ref mission_uid,
                ref targets,
            } => self.assign(mission_uid, targets),
            MissionCommand::Engage { ref mission_uid } => {
                lifecycle::engage(&mut self.mission, mission_uid)
            }
            MissionCommand::Terminate { ref mission_uid } => {
                lifecycle::terminate(&mut self.mission, mission_uid)
            }
        };
        let mission_uid = command.mission_uid();

        match result {
            Ok(()) => {
                info!(command = ?kind, mission_uid, "command accepted");
                CommandReply::accepted(kind, mission_uid)
            }
            Err(rejection) => {
                info!(command = ?kind, mission_uid, reason = %rejection, "command rejected");
                CommandReply::rejected(kind, mission_uid, rejection.to_string())
            }
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickOutput {
        self.time.advance();
        systems::movement::reset_steps(self.fleet.world_mut());

        let attack_events = match self.mission.state {
            MissionState::Engaging => {
                let events = self.run_systems();
                lifecycle::observe_progress(&mut self.mission);
                events
            }
            state if state.is_terminal() => {
                lifecycle::fade(&mut self.mission, self.config.fade_ticks);
                Vec::new()
            }
            _ => Vec::new(),
        };

        TickOutput {
            time: self.time,
            status: self.mission_status(),
            attack_events,
        }
    }

    /// Current mission status, `None` while the slot is free.
    pub fn mission_status(&self) -> Option<MissionStatus> {
        systems::snapshot::build_mission_status(&self.fleet, &self.mission)
    }

    /// Raw telemetry of every vehicle.
    pub fn fleet_status(&self) -> FleetStatus {
        systems::snapshot::build_fleet_status(&self.fleet, &self.time)
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Audit, allocate, then commit. Any rejection leaves everything as it was.
    fn assign(&mut self, mission_uid: &str, targets: &[AttackTarget]) -> Result<(), Rejection> {
        if lifecycle::gate_assign(&self.mission, mission_uid)? == AssignGate::Reacknowledge {
            debug!(mission_uid, "assign re-acknowledged");
            return Ok(());
        }

        let capacity = FleetCapacity::snapshot(&self.fleet);
        let demand = capacity::audit(targets, &capacity)?;
        let anchors: Vec<GeoPosition> = (0..self.fleet.swarm_count())
            .map(|index| self.fleet.leader_position(index))
            .collect();
        let allocation = allocator::allocate(targets, &capacity, &anchors)?;

        info!(
            mission_uid,
            guided = demand.guided,
            gravity = demand.gravity,
            legs = allocation.total_legs(),
            "mission allocated"
        );
        self.mission.commit(mission_uid.to_owned(), allocation.queues);
        Ok(())
    }

    /// Run all mission systems in order. Only called while engaging.
    fn run_systems(&mut self) -> Vec<AttackEvent> {
        let Some(mission_uid) = self.mission.mission_uid.clone() else {
            return Vec::new();
        };

        // 1. Leg progress + move steps
        let completed = systems::progress::run(
            &mut self.fleet,
            &mut self.mission.queues,
            &self.config.profiles,
        );
        // 2. Movement integration
        systems::movement::run(self.fleet.world_mut());
        // 3. Ordnance release + cursor advance
        let events = systems::strike::run(
            &mut self.fleet,
            &mut self.mission.queues,
            &completed,
            &mission_uid,
        );
        // 4. Aggregate progress
        self.mission.progress = self.mission.aggregate_progress();
        debug!(
            mission_uid = %mission_uid,
            progress = self.mission.progress,
            tick = self.time.tick,
            "mission progress"
        );

        events
    }
}
