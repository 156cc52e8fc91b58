//! Vehicle spawn factories for building the fleet from its configuration.
//!
//! Ids come from a serial counter owned by the builder: vehicles are
//! `<prefix>-<n>` across the whole fleet, swarms `<prefix>-<n>` in order.

use hecs::{Entity, World};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use warroom_core::components::*;
use warroom_core::types::GeoPosition;

use crate::config::{FleetConfig, FleetConfigError};
use crate::fleet::{Fleet, SwarmRoster};

/// Validate the configuration and spawn every vehicle.
pub fn build_fleet(config: &FleetConfig) -> Result<Fleet, FleetConfigError> {
    config.validate()?;

    let mut builder = FleetBuilder::new(config);
    let mut rosters = Vec::with_capacity(config.swarms.len());

    for (swarm_index, spec) in config.swarms.iter().enumerate() {
        let swarm_uid = format!("{}-{}", config.swarm_prefix, swarm_index + 1);
        let members = (0..spec.vehicles)
            .map(|slot| {
                let member = SwarmMember {
                    swarm_uid: swarm_uid.clone(),
                    swarm_index,
                    is_leader: slot == 0,
                };
                let bay = PayloadBay {
                    payloads: spec.loadout(slot).to_vec(),
                };
                builder.spawn_vehicle(member, bay)
            })
            .collect();
        rosters.push(SwarmRoster { swarm_uid, members });
    }

    info!(
        system_uid = %config.system_uid,
        swarms = rosters.len(),
        vehicles = builder.next_serial,
        "fleet ready"
    );

    Ok(Fleet::new(config.system_uid.clone(), builder.world, rosters))
}

struct FleetBuilder<'a> {
    config: &'a FleetConfig,
    world: World,
    rng: ChaCha8Rng,
    next_serial: u32,
}

impl<'a> FleetBuilder<'a> {
    fn new(config: &'a FleetConfig) -> Self {
        Self {
            config,
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_serial: 0,
        }
    }

    fn spawn_vehicle(&mut self, member: SwarmMember, bay: PayloadBay) -> Entity {
        self.next_serial += 1;
        let serial = self.next_serial;
        let airframe = Airframe {
            vehicle_uid: format!("{}-{}", self.config.vehicle_prefix, serial),
            kind: self.config.vehicle_kind.clone(),
            serial,
        };
        let position = self.start_position();

        self.world
            .spawn((airframe, member, bay, position, MoveStep::default()))
    }

    /// Origin plus a uniform horizontal offset within the scatter radius.
    fn start_position(&mut self) -> GeoPosition {
        let origin = self.config.origin;
        let scatter = self.config.scatter_deg;
        if scatter <= 0.0 {
            return origin;
        }
        let d_lat: f64 = self.rng.gen_range(-scatter..=scatter);
        let d_lon: f64 = self.rng.gen_range(-scatter..=scatter);
        GeoPosition::new(origin.lat + d_lat, origin.lon + d_lon, origin.alt)
    }
}
