// src/selection/status.rs
use crate::config::SelectionLimits;
use serde::{Deserialize, Serialize};

/// Where the selection count sits relative to the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    BelowMinimum,
    MinimumReached,
    OptimalRange,
    NearCapacity,
    CapacityReached,
}

impl SelectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStatus::BelowMinimum => "below_minimum",
            SelectionStatus::MinimumReached => "minimum_reached",
            SelectionStatus::OptimalRange => "optimal_range",
            SelectionStatus::NearCapacity => "near_capacity",
            SelectionStatus::CapacityReached => "capacity_reached",
        }
    }
}

/// Maps a count to a status. Swap implementations to change the bucket
/// boundaries without touching the state machine.
pub trait StatusPolicy: Send + Sync {
    fn classify(&self, count: usize, limits: &SelectionLimits) -> SelectionStatus;
}

impl<F> StatusPolicy for F
where
    F: Fn(usize, &SelectionLimits) -> SelectionStatus + Send + Sync,
{
    fn classify(&self, count: usize, limits: &SelectionLimits) -> SelectionStatus {
        self(count, limits)
    }
}

/// Fixed-width bands anchored on the bounds:
///
/// | count                         | status          |
/// |-------------------------------|-----------------|
/// | `>= max`                      | CapacityReached |
/// | `< min`                       | BelowMinimum    |
/// | `min ..= min + minimum_band`  | MinimumReached  |
/// | `max - near_capacity_band ..` | NearCapacity    |
/// | otherwise                     | OptimalRange    |
///
/// The defaults (2 and 1) give 5–7 / 8–28 / 29 / 30 for a 5..=30 selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandPolicy {
    pub minimum_band: usize,
    pub near_capacity_band: usize,
}

impl Default for BandPolicy {
    fn default() -> Self {
        Self {
            minimum_band: 2,
            near_capacity_band: 1,
        }
    }
}

impl StatusPolicy for BandPolicy {
    fn classify(&self, count: usize, limits: &SelectionLimits) -> SelectionStatus {
        if count >= limits.max_selection() {
            SelectionStatus::CapacityReached
        } else if count < limits.min_selection() {
            SelectionStatus::BelowMinimum
        } else if count <= limits.min_selection() + self.minimum_band {
            SelectionStatus::MinimumReached
        } else if count + self.near_capacity_band >= limits.max_selection() {
            SelectionStatus::NearCapacity
        } else {
            SelectionStatus::OptimalRange
        }
    }
}
