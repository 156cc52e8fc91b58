//! Mission allocator: round-robin assignment of targets to swarms.
//!
//! Each target's requested count is filled from successive swarms in
//! rotation. A swarm with matching stock takes `min(remaining, stock)` as one
//! leg; a swarm without stock is skipped. The rotation pointer advances after
//! every attempt, and carries over from one target to the next.
//!
//! Legs chain: each leg's movement vector starts at the swarm's previous
//! leg target (or at the leader for the first leg), so the whole flight
//! path is fixed at assignment time.

use warroom_core::commands::AttackTarget;
use warroom_core::types::GeoPosition;

use crate::capacity::FleetCapacity;
use crate::error::Rejection;
use crate::mission::{SubMission, SwarmQueue};

/// Per-swarm leg queues produced by one successful allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub queues: Vec<SwarmQueue>,
}

impl Allocation {
    pub fn total_legs(&self) -> usize {
        self.queues.iter().map(|q| q.legs.len()).sum()
    }

    pub fn committed(&self) -> u64 {
        self.queues.iter().map(|q| q.committed() as u64).sum()
    }
}

/// Rotation over swarm indices, wrapping at the swarm count.
#[derive(Debug, Clone)]
struct SwarmRotation {
    next: usize,
    len: usize,
}

impl SwarmRotation {
    fn new(len: usize) -> Self {
        Self { next: 0, len }
    }

    /// Current swarm index; the pointer moves on.
    fn take(&mut self) -> usize {
        let index = self.next;
        self.next = (self.next + 1) % self.len;
        index
    }
}

/// Split audited targets into per-swarm legs.
///
/// `anchors` holds each swarm leader's current position, in swarm order.
/// Works on a private copy of `capacity`; the caller commits the result.
pub fn allocate(
    targets: &[AttackTarget],
    capacity: &FleetCapacity,
    anchors: &[GeoPosition],
) -> Result<Allocation, Rejection> {
    let swarm_count = capacity.swarms.len();
    let mut stock = capacity.swarms.clone();
    let mut anchors = anchors.to_vec();
    anchors.resize(swarm_count, GeoPosition::default());
    let mut queues = vec![SwarmQueue::default(); swarm_count];
    let mut rotation = SwarmRotation::new(swarm_count.max(1));

    for target in targets {
        let payload_type = target
            .action
            .payload_type()
            .ok_or_else(|| Rejection::UnsupportedAction(target.action.to_string()))?;
        let position = target.position.ok_or(Rejection::MissingPosition)?;
        let mut remaining = u32::try_from(target.count).map_err(|_| Rejection::InvalidCount)?;

        // Swarms visited since the last successful fill.
        let mut idle = 0;
        while remaining > 0 {
            if idle >= swarm_count {
                return Err(Rejection::InsufficientCapacity {
                    payload: payload_type,
                    requested: remaining as i64,
                    available: 0,
                });
            }

            let swarm = rotation.take();
            let Some(available) = stock[swarm].stock_mut(payload_type) else {
                return Err(Rejection::UnsupportedAction(target.action.to_string()));
            };
            let fill = remaining.min(u32::try_from(*available).unwrap_or(u32::MAX));
            if fill == 0 {
                idle += 1;
                continue;
            }
            idle = 0;
            *available -= u64::from(fill);
            remaining -= fill;

            let delta = anchors[swarm].horizontal_delta_to(&position);
            anchors[swarm] = position;
            queues[swarm].legs.push(SubMission::new(
                target.action.clone(),
                target.target_uid.clone(),
                position,
                fill,
                delta,
            ));
        }
    }

    Ok(Allocation { queues })
}
