//! Target demand parser: attack targets to per-action demand totals.

use warroom_core::commands::AttackTarget;
use warroom_core::enums::{AttackAction, PayloadType};

/// Requested totals for one target list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDemand {
    /// Rounds requested by "snipe" targets.
    pub guided: i64,
    /// Rounds requested by "bombard" targets.
    pub gravity: i64,
    /// Rounds requested by unsupported actions.
    pub other: i64,
    /// Unsupported action names, in order of first appearance.
    pub unsupported: Vec<String>,
    /// Targets that carry no position.
    pub missing_position: usize,
}

impl TargetDemand {
    /// Requested total for one ordnance type.
    pub fn requested(&self, payload_type: PayloadType) -> i64 {
        match payload_type {
            PayloadType::GuidedBomb => self.guided,
            PayloadType::GravityBomb => self.gravity,
            PayloadType::Other => self.other,
        }
    }

    /// Guided plus gravity rounds.
    pub fn ordnance_total(&self) -> i64 {
        self.guided.saturating_add(self.gravity)
    }
}

/// Sum requested counts by action.
pub fn parse_demand(targets: &[AttackTarget]) -> TargetDemand {
    let mut demand = TargetDemand::default();
    for target in targets {
        if target.position.is_none() {
            demand.missing_position += 1;
        }
        match &target.action {
            AttackAction::Snipe => demand.guided = demand.guided.saturating_add(target.count),
            AttackAction::Bombard => demand.gravity = demand.gravity.saturating_add(target.count),
            AttackAction::Unsupported(name) => {
                demand.other = demand.other.saturating_add(target.count);
                if !demand.unsupported.contains(name) {
                    demand.unsupported.push(name.clone());
                }
            }
        }
    }
    demand
}
