//! Simulation runner - drives a `SimWorld` for a fixed duration.

use crate::demo_world::WorldSnapshot;
use crate::exporter::{SimExport, SimFrame};
use crate::triggers::TriggerQueue;
use crate::world::{JournalEntry, SimConfig, SimWorld};

use serde::Serialize;
use tracing::{debug, info, warn};
use worldstate_core::{default_catalog, SchedulerStats};
use worldstate_env::EventDefinition;

/// Results from a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Seed used
    pub seed: u64,

    /// Total ticks executed
    pub total_ticks: u64,

    /// Final simulation time in seconds
    pub final_time_secs: f64,

    /// Scheduler counters at the end of the run
    pub stats: SchedulerStats,

    /// Id of the event still running when the run stopped
    pub active_at_end: Option<String>,

    /// Forced triggers that fired
    pub triggers_fired: usize,

    /// Forced triggers whose category had no definition
    pub triggers_ignored: usize,

    /// Demo world state after the last tick
    pub final_world: WorldSnapshot,

    /// Event lifecycle journal
    pub journal: Vec<JournalEntry>,
}

/// Runs the demo world under the event scheduler.
pub struct SimRunner {
    config: SimConfig,
    catalog: Vec<EventDefinition>,
}

impl SimRunner {
    /// Creates a runner over the built-in catalog.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            catalog: default_catalog(),
        }
    }

    /// Replaces the event catalog.
    pub fn with_catalog(mut self, catalog: Vec<EventDefinition>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the tick rate.
    pub fn with_tick_rate(mut self, hz: u32) -> Self {
        self.config.tick_rate_hz = hz.max(1);
        self
    }

    /// Sets the maximum duration.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.config.max_duration_secs = secs;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Runs the simulation and returns the result.
    pub fn run(&self) -> RunResult {
        self.execute(None)
    }

    /// Runs the simulation, also capturing frames for export.
    pub fn run_with_export(&self) -> (RunResult, SimExport) {
        let mut export = SimExport::new(self.config.seed, self.config.tick_rate_hz);
        let result = self.execute(Some(&mut export));
        export.finalize(result.journal.clone(), result.stats.clone());
        (result, export)
    }

    fn execute(&self, mut export: Option<&mut SimExport>) -> RunResult {
        info!(
            "Starting simulation (seed={}, duration={:.1}s, tick_rate={}Hz, catalog={} events)",
            self.config.seed,
            self.config.max_duration_secs,
            self.config.tick_rate_hz,
            self.catalog.len()
        );
        if self.catalog.is_empty() {
            warn!("Event catalog is empty; no events will occur");
        }

        let mut world = SimWorld::new(self.config.clone(), self.catalog.clone());
        let mut triggers = TriggerQueue::new(self.config.triggers.clone());
        let max_ticks = (self.config.max_duration_secs * self.config.tick_rate_hz as f64).round() as u64;
        let snapshot_every = self.config.snapshot_every_ticks.max(1);

        let mut triggers_fired = 0;
        let mut triggers_ignored = 0;

        for _ in 0..max_ticks {
            world.tick();

            for trigger in triggers.due(world.time()) {
                if world.force(&trigger.category) {
                    triggers_fired += 1;
                } else {
                    warn!("Forced trigger {} has no matching event", trigger);
                    triggers_ignored += 1;
                }
            }

            if let Some(export) = export.as_deref_mut() {
                if world.tick_count() % snapshot_every == 0 {
                    let scheduler = world.scheduler();
                    export.add_frame(SimFrame {
                        time_sec: world.time(),
                        active_event: scheduler.active_event().map(|d| d.id.clone()),
                        progress: scheduler.progress(),
                        world: world.world().snapshot(),
                    });
                }
            }
        }

        if triggers.remaining() > 0 {
            debug!("{} forced triggers scheduled past the end of the run", triggers.remaining());
        }

        let scheduler = world.scheduler();
        let active_at_end = if scheduler.state().is_waiting() {
            None
        } else {
            scheduler.active_event().map(|d| d.id.clone())
        };

        let result = RunResult {
            seed: self.config.seed,
            total_ticks: world.tick_count(),
            final_time_secs: world.time(),
            stats: scheduler.stats().clone(),
            active_at_end,
            triggers_fired,
            triggers_ignored,
            final_world: world.world().snapshot(),
            journal: world.journal(),
        };

        info!(
            "Simulation complete: {} events started, {} overrides, {} entities alive",
            result.stats.events_started,
            result.stats.overrides,
            world.world().alive_count()
        );

        result
    }
}
