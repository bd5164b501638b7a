//! Scheduler timing configuration.

use crate::error::LoadError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A `[min, max]` span of seconds.
///
/// Stored as given; the bounds are put in order only when drawing, so a
/// range written as `(15, 8)` behaves exactly like `(8, 15)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: f64,
    pub max: f64,
}

impl TimeRange {
    /// Creates a range from two bounds in any order.
    pub fn new(a: f64, b: f64) -> Self {
        Self { min: a, max: b }
    }

    /// Creates a range that always yields `secs`.
    pub fn fixed(secs: f64) -> Self {
        Self::new(secs, secs)
    }

    /// Returns the bounds as `(low, high)` with `low <= high`.
    pub fn normalized(&self) -> (f64, f64) {
        (self.min.min(self.max), self.min.max(self.max))
    }

    /// Draws a uniform value from the normalized range.
    ///
    /// Ranges too wide to draw from (infinite bounds, overflowing width)
    /// yield the low bound, like a fixed range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let (low, high) = self.normalized();
        let drawable = ((high - low) / (1.0 - f64::EPSILON)).is_finite();
        if low < high && drawable {
            rng.gen_range(low..=high)
        } else {
            low
        }
    }

    /// Returns true if `secs` lies inside the normalized range.
    pub fn contains(&self, secs: f64) -> bool {
        let (low, high) = self.normalized();
        secs >= low && secs <= high
    }
}

impl From<(f64, f64)> for TimeRange {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

/// Timing knobs for an `EventScheduler`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Delay before the first event after `start()`
    #[serde(default = "default_initial_delay")]
    pub initial_delay: TimeRange,

    /// Gap between the end of one event and the start of the next
    #[serde(default = "default_interval")]
    pub interval: TimeRange,
}

fn default_initial_delay() -> TimeRange {
    TimeRange::new(2.0, 5.0)
}

fn default_interval() -> TimeRange {
    TimeRange::new(8.0, 15.0)
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_delay: default_initial_delay(),
            interval: default_interval(),
        }
    }
}

impl SchedulerConfig {
    /// Sets the initial delay range.
    pub fn with_initial_delay(mut self, range: impl Into<TimeRange>) -> Self {
        self.initial_delay = range.into();
        self
    }

    /// Sets the inter-event interval range.
    pub fn with_interval(mut self, range: impl Into<TimeRange>) -> Self {
        self.interval = range.into();
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LoadError::io(path.display(), e))?;
        Self::from_json_str(&json)
    }
}
