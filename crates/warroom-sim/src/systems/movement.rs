//! Kinematic integration system.
//!
//! Updates GeoPosition from MoveStep each tick: position += move_step.

use hecs::World;

use warroom_core::components::MoveStep;
use warroom_core::types::GeoPosition;

/// Run integration for all entities with GeoPosition + MoveStep.
pub fn run(world: &mut World) {
    for (_entity, (pos, step)) in world.query_mut::<(&mut GeoPosition, &MoveStep)>() {
        *pos = pos.translated(step.delta);
    }
}

/// Zero every move step. Vehicles that are not moving this tick keep a zero step.
pub fn reset_steps(world: &mut World) {
    for (_entity, step) in world.query_mut::<&mut MoveStep>() {
        *step = MoveStep::default();
    }
}
