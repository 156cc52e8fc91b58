//! Capacity auditor: per-swarm ordnance capacity and demand validation.
//!
//! The capacity snapshot is read-only. The same snapshot feeds the
//! allocator in the same assignment pass.

use tracing::debug;

use warroom_core::commands::AttackTarget;
use warroom_core::enums::PayloadType;

use crate::demand::{parse_demand, TargetDemand};
use crate::error::Rejection;
use crate::fleet::Fleet;

/// Ordnance carried by one swarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwarmCapacity {
    pub swarm_uid: String,
    pub guided: u64,
    pub gravity: u64,
}

/// Ordnance carried by every swarm, in swarm creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetCapacity {
    pub swarms: Vec<SwarmCapacity>,
}

impl SwarmCapacity {
    pub fn stock(&self, payload_type: PayloadType) -> u64 {
        match payload_type {
            PayloadType::GuidedBomb => self.guided,
            PayloadType::GravityBomb => self.gravity,
            PayloadType::Other => 0,
        }
    }

    /// Mutable stock counter, `None` for non-ordnance payloads.
    pub fn stock_mut(&mut self, payload_type: PayloadType) -> Option<&mut u64> {
        match payload_type {
            PayloadType::GuidedBomb => Some(&mut self.guided),
            PayloadType::GravityBomb => Some(&mut self.gravity),
            PayloadType::Other => None,
        }
    }
}

impl FleetCapacity {
    /// Sum payload amounts per swarm per ordnance type.
    pub fn snapshot(fleet: &Fleet) -> Self {
        let swarms = fleet
            .swarms()
            .iter()
            .enumerate()
            .map(|(index, roster)| SwarmCapacity {
                swarm_uid: roster.swarm_uid.clone(),
                guided: fleet.swarm_stock(index, PayloadType::GuidedBomb),
                gravity: fleet.swarm_stock(index, PayloadType::GravityBomb),
            })
            .collect();
        Self { swarms }
    }

    pub fn total(&self, payload_type: PayloadType) -> u64 {
        self.swarms
            .iter()
            .map(|s| s.stock(payload_type))
            .fold(0, u64::saturating_add)
    }
}

/// Validate a target list against fleet capacity. Nothing is reserved.
pub fn audit(
    targets: &[AttackTarget],
    capacity: &FleetCapacity,
) -> Result<TargetDemand, Rejection> {
    let demand = parse_demand(targets);

    if demand.missing_position > 0 {
        return Err(Rejection::MissingPosition);
    }
    if demand.guided < 0
        || demand.gravity < 0
        || demand.other < 0
        || targets.iter().any(|t| t.count < 0)
    {
        return Err(Rejection::InvalidCount);
    }
    if demand.guided == 0 && demand.gravity == 0 {
        return Err(Rejection::InvalidCount);
    }
    if let Some(action) = demand.unsupported.first() {
        return Err(Rejection::UnsupportedAction(action.clone()));
    }

    for payload in [PayloadType::GuidedBomb, PayloadType::GravityBomb] {
        let requested = demand.requested(payload);
        let available = capacity.total(payload);
        if requested as u64 > available {
            return Err(Rejection::InsufficientCapacity {
                payload,
                requested,
                available,
            });
        }
    }

    debug!(
        guided = demand.guided,
        gravity = demand.gravity,
        guided_stock = capacity.total(PayloadType::GuidedBomb),
        gravity_stock = capacity.total(PayloadType::GravityBomb),
        "target demand within capacity"
    );
    Ok(demand)
}
