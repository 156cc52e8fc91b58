//! Fleet model: the hecs world of vehicles plus swarm rosters.
//!
//! Rosters keep creation order, so every pass over a swarm visits its
//! vehicles leader first and then wingmen in serial order.

use hecs::{Entity, World};

use warroom_core::components::{Airframe, PayloadBay};
use warroom_core::enums::PayloadType;
use warroom_core::types::GeoPosition;

/// Ordered membership of one swarm.
#[derive(Debug, Clone)]
pub struct SwarmRoster {
    pub swarm_uid: String,
    /// Leader first, then wingmen in serial order.
    pub members: Vec<Entity>,
}

/// All vehicles and swarms, created once at startup.
pub struct Fleet {
    system_uid: String,
    world: World,
    swarms: Vec<SwarmRoster>,
}

impl Fleet {
    pub(crate) fn new(system_uid: String, world: World, swarms: Vec<SwarmRoster>) -> Self {
        Self {
            system_uid,
            world,
            swarms,
        }
    }

    pub fn system_uid(&self) -> &str {
        &self.system_uid
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Rosters and world borrowed together.
    pub(crate) fn split_mut(&mut self) -> (&[SwarmRoster], &mut World) {
        (&self.swarms, &mut self.world)
    }

    /// Swarms in creation order.
    pub fn swarms(&self) -> &[SwarmRoster] {
        &self.swarms
    }

    pub fn swarm_count(&self) -> usize {
        self.swarms.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.swarms.iter().map(|s| s.members.len()).sum()
    }

    /// Current position of a swarm's leader.
    pub fn leader_position(&self, swarm_index: usize) -> GeoPosition {
        self.swarms
            .get(swarm_index)
            .and_then(|roster| roster.members.first())
            .and_then(|&leader| self.world.get::<&GeoPosition>(leader).ok().map(|p| *p))
            .unwrap_or_default()
    }

    /// Rounds of one payload type carried by a whole swarm.
    pub fn swarm_stock(&self, swarm_index: usize, payload_type: PayloadType) -> u64 {
        let Some(roster) = self.swarms.get(swarm_index) else {
            return 0;
        };
        roster
            .members
            .iter()
            .filter_map(|&e| self.world.get::<&PayloadBay>(e).ok())
            .map(|bay| bay.stock(payload_type))
            .sum()
    }

    /// Guided plus gravity rounds carried by a whole swarm.
    pub fn remaining_ammunition(&self, swarm_index: usize) -> u64 {
        self.swarm_stock(swarm_index, PayloadType::GuidedBomb)
            .saturating_add(self.swarm_stock(swarm_index, PayloadType::GravityBomb))
    }

    /// Rounds of one payload type carried by the whole fleet.
    pub fn total_stock(&self, payload_type: PayloadType) -> u64 {
        (0..self.swarms.len())
            .map(|i| self.swarm_stock(i, payload_type))
            .fold(0, u64::saturating_add)
    }

    /// Look up a vehicle by its uid.
    pub fn find_vehicle(&self, vehicle_uid: &str) -> Option<Entity> {
        self.world
            .query::<&Airframe>()
            .iter()
            .find(|(_, airframe)| airframe.vehicle_uid == vehicle_uid)
            .map(|(entity, _)| entity)
    }

    pub fn position_of(&self, vehicle_uid: &str) -> Option<GeoPosition> {
        let entity = self.find_vehicle(vehicle_uid)?;
        self.world.get::<&GeoPosition>(entity).ok().map(|p| *p)
    }

    pub fn payloads_of(&self, vehicle_uid: &str) -> Option<PayloadBay> {
        let entity = self.find_vehicle(vehicle_uid)?;
        self.world.get::<&PayloadBay>(entity).ok().map(|b| (*b).clone())
    }
}
