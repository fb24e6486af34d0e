//! Entrance delay policies, kept apart from the diffing so they can be swapped freely.

use crate::core::config::ChartConfig;

/// Position of a bar within the chart: its category column and its slot inside that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Slot {
    pub category_index: usize,
    pub group_index: usize,
}

pub trait StaggerPolicy {
    fn delay_ms(&self, slot: Slot) -> f64;
}

/// Left-to-right cascade: a fixed delay per category plus a smaller one per group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cascade {
    pub per_category_ms: f64,
    pub per_group_ms: f64,
}

impl Cascade {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            per_category_ms: config.per_category_delay_ms,
            per_group_ms: config.per_group_delay_ms,
        }
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl StaggerPolicy for Cascade {
    fn delay_ms(&self, slot: Slot) -> f64 {
        slot.category_index as f64 * self.per_category_ms + slot.group_index as f64 * self.per_group_ms
    }
}

/// Everything starts at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Simultaneous;

impl StaggerPolicy for Simultaneous {
    fn delay_ms(&self, _slot: Slot) -> f64 {
        0.0
    }
}
