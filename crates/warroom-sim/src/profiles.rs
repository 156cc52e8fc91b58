//! Per-swarm progress profiles.
//!
//! A profile sets how fast a swarm advances through a leg and when its
//! leader and wingmen move. Profiles are cycled by swarm index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use warroom_core::constants::{DEFAULT_PROGRESS_PROFILES, PROGRESS_MAX};

/// Progress pacing for one swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressProfile {
    /// Progress added to the active leg each tick.
    pub step: u32,
    /// Progress after which wingmen start moving.
    pub lead_threshold: u32,
}

/// Validated, non-empty profile table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProgressProfile>", into = "Vec<ProgressProfile>")]
pub struct ProgressProfileTable {
    profiles: Vec<ProgressProfile>,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("progress profile table is empty")]
    Empty,
    #[error("progress profile {index}: step must be positive")]
    ZeroStep { index: usize },
    #[error("progress profile {index}: lead threshold {lead} must be below 100")]
    LeadOutOfRange { index: usize, lead: u32 },
    #[error("progress profile {index}: step {step} exceeds tail threshold {tail}")]
    StepTooLarge { index: usize, step: u32, tail: u32 },
    #[error("failed to parse progress profiles: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProgressProfile {
    pub fn new(step: u32, lead_threshold: u32) -> Self {
        Self {
            step,
            lead_threshold,
        }
    }

    /// Progress up to which the leader keeps moving.
    pub fn tail_threshold(&self) -> u32 {
        PROGRESS_MAX.saturating_sub(self.lead_threshold)
    }

    /// Number of equal movement increments per leg. At least 1.
    pub fn segments(&self) -> u32 {
        (self.tail_threshold() / self.step.max(1)).max(1)
    }

    /// Whether a vehicle moves at the given (unclamped) leg progress.
    pub fn moves(&self, is_leader: bool, progress: u32) -> bool {
        if is_leader {
            progress <= self.tail_threshold()
        } else {
            progress > self.lead_threshold
        }
    }

    fn validate(&self, index: usize) -> Result<(), ProfileError> {
        if self.step == 0 {
            return Err(ProfileError::ZeroStep { index });
        }
        if self.lead_threshold >= PROGRESS_MAX {
            return Err(ProfileError::LeadOutOfRange {
                index,
                lead: self.lead_threshold,
            });
        }
        let tail = self.tail_threshold();
        if self.step > tail {
            return Err(ProfileError::StepTooLarge {
                index,
                step: self.step,
                tail,
            });
        }
        Ok(())
    }
}

impl ProgressProfileTable {
    pub fn new(profiles: Vec<ProgressProfile>) -> Result<Self, ProfileError> {
        if profiles.is_empty() {
            return Err(ProfileError::Empty);
        }
        for (index, profile) in profiles.iter().enumerate() {
            profile.validate(index)?;
        }
        Ok(Self { profiles })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let profiles: Vec<ProgressProfile> = serde_json::from_str(json)?;
        Self::new(profiles)
    }

    /// Profile for the swarm at `swarm_index` (cycled).
    pub fn for_swarm(&self, swarm_index: usize) -> ProgressProfile {
        self.profiles[swarm_index % self.profiles.len()]
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProgressProfileTable {
    fn default() -> Self {
        Self {
            profiles: DEFAULT_PROGRESS_PROFILES
                .iter()
                .map(|&(step, lead)| ProgressProfile::new(step, lead))
                .collect(),
        }
    }
}

impl TryFrom<Vec<ProgressProfile>> for ProgressProfileTable {
    type Error = ProfileError;

    fn try_from(profiles: Vec<ProgressProfile>) -> Result<Self, Self::Error> {
        Self::new(profiles)
    }
}

impl From<ProgressProfileTable> for Vec<ProgressProfile> {
    fn from(table: ProgressProfileTable) -> Self {
        table.profiles
    }
}
