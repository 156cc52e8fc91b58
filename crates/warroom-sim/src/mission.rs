//! Mission data model: the single active mission and its per-swarm legs.
//!
//! Stored in `MissionEngine`, NOT as ECS entities.

use glam::DVec2;

use warroom_core::constants::{PROGRESS_EPSILON, PROGRESS_MAX};
use warroom_core::enums::{AttackAction, MissionState};
use warroom_core::types::GeoPosition;

/// One swarm's committed flight-and-attack leg against one target.
#[derive(Debug, Clone, PartialEq)]
pub struct SubMission {
    pub action: AttackAction,
    pub target_uid: Option<String>,
    pub target_position: GeoPosition,
    /// Rounds committed to this leg.
    pub count: u32,
    /// Rounds actually released when the leg completed.
    pub delivered: u32,
    /// Horizontal movement (dLat, dLon) from the previous leg's target, or
    /// the leader's position for a swarm's first leg.
    pub delta: DVec2,
    /// Leg progress, 0 - 100.
    pub progress: u32,
}

/// Ordered legs of one swarm plus the cursor on the active leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwarmQueue {
    pub legs: Vec<SubMission>,
    pub cursor: usize,
}

/// The one mission slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    /// `None` while the slot is free.
    pub mission_uid: Option<String>,
    pub state: MissionState,
    /// Aggregate progress, 0 - 100.
    pub progress: u32,
    /// Leg count over all swarms, the progress denominator.
    pub total_legs: usize,
    /// Ticks left before a terminal mission releases its id.
    pub fade: i32,
    /// One queue per swarm, in swarm creation order.
    pub queues: Vec<SwarmQueue>,
}

impl SubMission {
    pub fn new(
        action: AttackAction,
        target_uid: Option<String>,
        target_position: GeoPosition,
        count: u32,
        delta: DVec2,
    ) -> Self {
        Self {
            action,
            target_uid,
            target_position,
            count,
            delivered: 0,
            delta,
            progress: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= PROGRESS_MAX
    }
}

impl SwarmQueue {
    /// Leg under the cursor, if the queue is not drained.
    pub fn current(&self) -> Option<&SubMission> {
        self.legs.get(self.cursor)
    }

    pub fn current_mut(&mut self) -> Option<&mut SubMission> {
        self.legs.get_mut(self.cursor)
    }

    pub fn is_drained(&self) -> bool {
        self.cursor >= self.legs.len()
    }

    /// Move the cursor to the next leg. Never moves backwards.
    pub fn advance(&mut self) {
        if self.cursor < self.legs.len() {
            self.cursor += 1;
        }
    }

    /// Rounds committed over all legs.
    pub fn committed(&self) -> u32 {
        self.legs.iter().map(|leg| leg.count).sum()
    }
}

impl Mission {
    pub fn new(fade_ticks: i32) -> Self {
        Self {
            mission_uid: None,
            state: MissionState::None,
            progress: 0,
            total_legs: 0,
            fade: fade_ticks,
            queues: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.mission_uid.is_some()
    }

    pub fn is_active_uid(&self, mission_uid: &str) -> bool {
        self.mission_uid.as_deref() == Some(mission_uid)
    }

    /// Occupy the slot with a freshly allocated mission in `ready`.
    pub fn commit(&mut self, mission_uid: String, queues: Vec<SwarmQueue>) {
        self.total_legs = queues.iter().map(|q| q.legs.len()).sum();
        self.mission_uid = Some(mission_uid);
        self.state = MissionState::Ready;
        self.progress = 0;
        self.queues = queues;
    }

    /// Free the slot and reset the fade counter for the next mission.
    pub fn clear(&mut self, fade_ticks: i32) {
        *self = Mission::new(fade_ticks);
    }

    /// `floor((sum of leg progress + epsilon) / total legs)`, clamped to 0 - 100.
    pub fn aggregate_progress(&self) -> u32 {
        if self.total_legs == 0 {
            return 0;
        }
        let sum: u64 = self
            .queues
            .iter()
            .flat_map(|q| q.legs.iter())
            .map(|leg| leg.progress as u64)
            .sum();
        let average = ((sum as f64 + PROGRESS_EPSILON) / self.total_legs as f64).floor();
        average.clamp(0.0, PROGRESS_MAX as f64) as u32
    }
}
