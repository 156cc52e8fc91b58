//! Strike system: releases ordnance for completed legs and advances cursors.
//!
//! Vehicles are drawn in roster order (leader first), payload slots in bay
//! order. Each non-empty draw is one attack event. Stock is consumed here,
//! at attack time, never at assignment time.

use tracing::{info, warn};

use warroom_core::components::{Airframe, PayloadBay};
use warroom_core::events::AttackEvent;

use crate::fleet::Fleet;
use crate::mission::SwarmQueue;

/// Release ordnance for every swarm in `completed` and move its cursor on.
pub fn run(
    fleet: &mut Fleet,
    queues: &mut [SwarmQueue],
    completed: &[usize],
    mission_uid: &str,
) -> Vec<AttackEvent> {
    let mut events = Vec::new();
    let (rosters, world) = fleet.split_mut();

    for &swarm_index in completed {
        let (Some(queue), Some(roster)) = (queues.get_mut(swarm_index), rosters.get(swarm_index))
        else {
            continue;
        };
        let Some(leg) = queue.current_mut() else {
            continue;
        };
        let Some(payload_type) = leg.action.payload_type() else {
            continue;
        };

        let mut remaining = leg.count;
        for &entity in &roster.members {
            if remaining == 0 {
                break;
            }
            let Ok(vehicle_uid) = world.get::<&Airframe>(entity).map(|a| a.vehicle_uid.clone())
            else {
                continue;
            };
            let Ok(mut bay) = world.get::<&mut PayloadBay>(entity) else {
                continue;
            };
            for payload in bay
                .payloads
                .iter_mut()
                .filter(|p| p.payload_type == payload_type)
            {
                if remaining == 0 {
                    break;
                }
                let draw = payload.amount.min(remaining);
                if draw == 0 {
                    continue;
                }
                payload.amount -= draw;
                remaining -= draw;
                leg.delivered += draw;

                info!(
                    mission_uid,
                    vehicle_uid = %vehicle_uid,
                    target_uid = leg.target_uid.as_deref().unwrap_or("-"),
                    count = draw,
                    "attack"
                );
                events.push(AttackEvent {
                    mission_uid: mission_uid.to_owned(),
                    vehicle_uid: vehicle_uid.clone(),
                    target_uid: leg.target_uid.clone(),
                    count: (draw > 1).then_some(draw),
                });
            }
        }

        if remaining > 0 {
            warn!(
                mission_uid,
                swarm_uid = %roster.swarm_uid,
                undelivered = remaining,
                "swarm ran out of ordnance before the leg count was met"
            );
        }

        queue.advance();
    }

    events
}
