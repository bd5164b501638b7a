//! Counters collected while the scheduler runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use worldstate_env::EventCategory;

/// Lifetime counters for one scheduler.
///
/// Purely observational; nothing here feeds back into scheduling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Events that began (selected or forced)
    pub events_started: u64,

    /// Events that ended, for any reason
    pub events_ended: u64,

    /// Events cut short by an override or a restart
    pub events_preempted: u64,

    /// Successful `trigger_now` calls
    pub overrides: u64,

    /// Seconds of update time spent with an event active
    pub active_secs: f64,

    /// Start count per category name
    pub starts_by_category: BTreeMap<String, u64>,
}

impl SchedulerStats {
    pub(crate) fn record_start(&mut self, category: &EventCategory) {
        self.events_started += 1;
        *self.starts_by_category.entry(category.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn record_end(&mut self, preempted: bool) {
        self.events_ended += 1;
        if preempted {
            self.events_preempted += 1;
        }
    }

    /// Returns how many times `category` has started.
    pub fn starts_of(&self, category: &EventCategory) -> u64 {
        self.starts_by_category
            .get(&category.to_string())
            .copied()
            .unwrap_or(0)
    }
}
