//! JSON exporter for simulation runs.
//!
//! Captures periodic world snapshots plus the event journal so a run can be
//! inspected or plotted offline.

use crate::demo_world::WorldSnapshot;
use crate::error::SimError;
use crate::world::JournalEntry;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use worldstate_core::SchedulerStats;

/// A single frame of simulation data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimFrame {
    /// Simulation time in seconds
    pub time_sec: f64,

    /// Id of the active event, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_event: Option<String>,

    /// Progress of the active event in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,

    /// Demo world state
    pub world: WorldSnapshot,
}

/// Complete simulation export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Seed used
    pub seed: u64,

    pub tick_rate_hz: u32,

    /// Duration in seconds
    pub duration_sec: f64,

    /// All frames
    pub frames: Vec<SimFrame>,

    /// Event lifecycle journal
    pub journal: Vec<JournalEntry>,

    /// Final scheduler counters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<SchedulerStats>,
}

impl SimExport {
    /// Creates a new export container.
    pub fn new(seed: u64, tick_rate_hz: u32) -> Self {
        Self {
            seed,
            tick_rate_hz,
            duration_sec: 0.0,
            frames: Vec::new(),
            journal: Vec::new(),
            stats: None,
        }
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, frame: SimFrame) {
        self.duration_sec = frame.time_sec;
        self.frames.push(frame);
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, journal: Vec<JournalEntry>, stats: SchedulerStats) {
        self.journal = journal;
        self.stats = Some(stats);
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let path = path.as_ref();
        let export_err = |source| SimError::Export {
            path: path.display().to_string(),
            source,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| export_err(e.into()))?;
        let mut file = File::create(path).map_err(export_err)?;
        file.write_all(json.as_bytes()).map_err(export_err)?;
        Ok(())
    }
}
