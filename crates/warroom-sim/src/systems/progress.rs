//! Leg progress system.
//!
//! Advances the active leg of every swarm by its profile step and sets the
//! move step of each vehicle. Leaders move early in the leg, wingmen late,
//! giving a staggered formation. Both cover the leg vector in `segments`
//! equal increments.

use glam::DVec3;
use tracing::debug;

use warroom_core::components::{MoveStep, SwarmMember};
use warroom_core::constants::PROGRESS_MAX;

use crate::fleet::Fleet;
use crate::mission::SwarmQueue;
use crate::profiles::ProgressProfileTable;

/// Advance active legs. Returns the indices of swarms whose leg completed.
pub fn run(
    fleet: &mut Fleet,
    queues: &mut [SwarmQueue],
    profiles: &ProgressProfileTable,
) -> Vec<usize> {
    let mut completed = Vec::new();
    let (rosters, world) = fleet.split_mut();

    for (swarm_index, queue) in queues.iter_mut().enumerate() {
        let leg_index = queue.cursor;
        let Some(leg) = queue.current_mut() else {
            continue;
        };
        if leg.progress >= PROGRESS_MAX {
            continue;
        }
        let Some(roster) = rosters.get(swarm_index) else {
            continue;
        };

        let profile = profiles.for_swarm(swarm_index);
        let segments = profile.segments() as f64;
        // Unclamped: movement is decided on the raw value.
        let progress = leg.progress + profile.step;
        leg.progress = progress;

        let increment = DVec3::new(leg.delta.x / segments, leg.delta.y / segments, 0.0);
        for &entity in &roster.members {
            let is_leader = world
                .get::<&SwarmMember>(entity)
                .map(|m| m.is_leader)
                .unwrap_or(false);
            if !profile.moves(is_leader, progress) {
                continue;
            }
            if let Ok(mut step) = world.get::<&mut MoveStep>(entity) {
                step.delta = increment;
            }
        }

        debug!(
            swarm_uid = %roster.swarm_uid,
            leg = leg_index,
            progress,
            "leg advanced"
        );

        if progress >= PROGRESS_MAX {
            leg.progress = PROGRESS_MAX;
            completed.push(swarm_index);
        }
    }

    completed
}
