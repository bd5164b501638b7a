//! Forced event triggers for simulation runs.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use worldstate_env::EventCategory;

/// A `trigger_now` call scheduled at a simulation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcedTrigger {
    /// Simulation time in seconds at which to fire
    pub at_secs: f64,

    /// Category to force
    pub category: EventCategory,
}

impl ForcedTrigger {
    pub fn new(category: EventCategory, at_secs: f64) -> Self {
        Self { at_secs, category }
    }

    /// The override used by the stock demo: low gravity at 20s.
    pub fn demo() -> Self {
        Self::new(EventCategory::LowGravity, 20.0)
    }
}

impl std::fmt::Display for ForcedTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.category, self.at_secs)
    }
}

impl std::str::FromStr for ForcedTrigger {
    type Err = SimError;

    /// Parses `<category>@<seconds>`, e.g. `low_gravity@20`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, at) = s
            .rsplit_once('@')
            .ok_or_else(|| SimError::InvalidTrigger(format!("expected <category>@<seconds>, got '{}'", s)))?;

        let at_secs: f64 = at
            .trim()
            .parse()
            .map_err(|_| SimError::InvalidTrigger(format!("bad time '{}' in '{}'", at, s)))?;
        if !at_secs.is_finite() || at_secs < 0.0 {
            return Err(SimError::InvalidTrigger(format!("time must be >= 0 in '{}'", s)));
        }

        Ok(Self::new(category.parse()?, at_secs))
    }
}

/// Fires each trigger once, the first time the clock reaches it.
#[derive(Debug, Clone, Default)]
pub struct TriggerQueue {
    pending: Vec<ForcedTrigger>,
}

impl TriggerQueue {
    pub fn new(mut triggers: Vec<ForcedTrigger>) -> Self {
        // Latest first so due triggers pop off the end in time order
        triggers.sort_by(|a, b| b.at_secs.total_cmp(&a.at_secs));
        Self { pending: triggers }
    }

    /// Removes and returns every trigger due at `now_secs`, earliest first.
    pub fn due(&mut self, now_secs: f64) -> Vec<ForcedTrigger> {
        let mut fired = Vec::new();
        while self.pending.last().is_some_and(|t| t.at_secs <= now_secs) {
            if let Some(trigger) = self.pending.pop() {
                fired.push(trigger);
            }
        }
        fired
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}
