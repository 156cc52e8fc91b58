//! Snapshot system: builds mission status and fleet telemetry.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use warroom_core::components::{Airframe, SwarmMember};
use warroom_core::constants::STATUS_TTL;
use warroom_core::state::*;
use warroom_core::types::{GeoPosition, SimTime};

use crate::fleet::Fleet;
use crate::mission::Mission;

/// Mission status, `None` while the mission slot is free.
pub fn build_mission_status(fleet: &Fleet, mission: &Mission) -> Option<MissionStatus> {
    let mission_uid = mission.mission_uid.clone()?;

    let swarms = fleet
        .swarms()
        .iter()
        .enumerate()
        .map(|(index, roster)| SwarmStatusView {
            swarm_uid: roster.swarm_uid.clone(),
            remaining_ammunition: fleet.remaining_ammunition(index),
            current_target: mission
                .queues
                .get(index)
                .and_then(|q| q.current())
                .and_then(|leg| leg.target_uid.clone()),
        })
        .collect();

    Some(MissionStatus {
        mission_uid,
        state: mission.state,
        progress: mission.progress,
        swarms,
    })
}

/// Raw position report for every vehicle, in serial order.
pub fn build_fleet_status(fleet: &Fleet, time: &SimTime) -> FleetStatus {
    FleetStatus {
        system_uid: fleet.system_uid().to_owned(),
        ttl: STATUS_TTL,
        time: *time,
        vehicles: build_vehicles(fleet.world()),
    }
}

fn build_vehicles(world: &World) -> Vec<VehicleView> {
    let mut vehicles: Vec<(u32, VehicleView)> = world
        .query::<(&Airframe, &SwarmMember, &GeoPosition)>()
        .iter()
        .map(|(_, (airframe, member, pos))| {
            (
                airframe.serial,
                VehicleView {
                    vehicle_uid: airframe.vehicle_uid.clone(),
                    position: *pos,
                    kind: airframe.kind.clone(),
                    swarm_uid: member.swarm_uid.clone(),
                    is_leader: member.is_leader,
                },
            )
        })
        .collect();

    vehicles.sort_by_key(|(serial, _)| *serial);
    vehicles.into_iter().map(|(_, view)| view).collect()
}
