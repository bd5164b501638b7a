//! SimWorld - the simulation harness container.

use crate::demo_world::DemoWorld;
use crate::triggers::ForcedTrigger;

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};
use worldstate_core::{EventScheduler, SchedulerConfig};
use worldstate_env::{EventCategory, EventDefinition};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Master seed for determinism
    pub seed: u64,

    /// Tick rate in Hz
    pub tick_rate_hz: u32,

    /// Simulation duration in seconds
    pub max_duration_secs: f64,

    /// Scheduler delay/interval ranges
    pub scheduler: SchedulerConfig,

    /// Overrides fired at fixed simulation times
    pub triggers: Vec<ForcedTrigger>,

    /// Export a world snapshot every N ticks
    pub snapshot_every_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate_hz: 10,
            max_duration_secs: 60.0,
            scheduler: SchedulerConfig::default(),
            triggers: vec![ForcedTrigger::demo()],
            snapshot_every_ticks: 10,
        }
    }
}

/// What happened at a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalKind {
    /// An override was requested for this event's category
    Forced,
    Started,
    Ended,
}

/// One lifecycle record in the run journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub time_sec: f64,
    pub kind: JournalKind,
    pub event_id: String,
    pub display_name: String,
    pub category: String,
    pub duration: f64,
    pub intensity: f64,
}

impl JournalEntry {
    fn new(time_sec: f64, kind: JournalKind, def: &EventDefinition) -> Self {
        Self {
            time_sec,
            kind,
            event_id: def.id.clone(),
            display_name: def.display_name.clone(),
            category: def.category.to_string(),
            duration: def.duration,
            intensity: def.intensity,
        }
    }
}

/// Progress is logged once per quarter of an event.
const PROGRESS_LOG_BUCKETS: f64 = 4.0;

/// The SimWorld - a scheduler over a `DemoWorld` plus a virtual clock.
pub struct SimWorld {
    /// Configuration
    pub config: SimConfig,

    /// The event scheduler driving the demo world
    scheduler: EventScheduler<DemoWorld>,

    /// Simulation time in seconds, shared with observers
    clock: Rc<Cell<f64>>,

    /// Lifecycle records, appended by observers
    journal: Rc<RefCell<Vec<JournalEntry>>>,

    /// Current tick count
    tick_count: u64,
}

impl SimWorld {
    /// Creates a new SimWorld and starts its scheduler.
    pub fn new(config: SimConfig, catalog: Vec<EventDefinition>) -> Self {
        // Separate seed so world randomness never perturbs event selection
        let physics_seed = config.seed.wrapping_mul(0x9e3779b97f4a7c15);

        let mut scheduler = EventScheduler::with_seed(DemoWorld::new(physics_seed), config.seed)
            .with_config(config.scheduler);
        scheduler.set_catalog(catalog);

        let clock = Rc::new(Cell::new(0.0));
        let journal = Rc::new(RefCell::new(Vec::new()));
        let logged_bucket = Rc::new(Cell::new(0u32));

        {
            let clock = Rc::clone(&clock);
            let journal = Rc::clone(&journal);
            let logged_bucket = Rc::clone(&logged_bucket);
            scheduler.on_start(move |def| {
                logged_bucket.set(0);
                info!(
                    "[START] t={:.1}s {} - {} (intensity={:.2}, duration={:.1}s)",
                    clock.get(),
                    def.display_name,
                    def.description,
                    def.intensity,
                    def.duration
                );
                journal
                    .borrow_mut()
                    .push(JournalEntry::new(clock.get(), JournalKind::Started, def));
            });
        }
        {
            let clock = Rc::clone(&clock);
            let journal = Rc::clone(&journal);
            scheduler.on_end(move |def| {
                info!("[END]   t={:.1}s {}", clock.get(), def.display_name);
                journal
                    .borrow_mut()
                    .push(JournalEntry::new(clock.get(), JournalKind::Ended, def));
            });
        }
        scheduler.on_tick(move |def, progress| {
            let bucket = (progress * PROGRESS_LOG_BUCKETS).floor() as u32;
            if bucket > logged_bucket.get() {
                logged_bucket.set(bucket);
                debug!("  {} progress: {:.0}%", def.display_name, progress * 100.0);
            }
        });

        scheduler.start();

        Self {
            config,
            scheduler,
            clock,
            journal,
            tick_count: 0,
        }
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) {
        let rate = self.config.tick_rate_hz as f64;

        // Derived from the tick count so the clock lands on whole seconds
        self.tick_count += 1;
        self.clock.set(self.tick_count as f64 / rate);
        self.scheduler.update(1.0 / rate);
    }

    /// Forces an event of `category` now. Returns false if none exists.
    pub fn force(&mut self, category: &EventCategory) -> bool {
        let Some(def) = self
            .scheduler
            .catalog()
            .iter()
            .find(|d| &d.category == category)
            .cloned()
        else {
            debug!("No definition for forced category {}", category);
            return false;
        };

        info!("[FORCE] t={:.1}s {}", self.time(), def.display_name);
        self.journal
            .borrow_mut()
            .push(JournalEntry::new(self.time(), JournalKind::Forced, &def));

        self.scheduler.trigger_now(category)
    }

    /// Returns the current simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.clock.get()
    }

    /// Returns the current tick count.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn scheduler(&self) -> &EventScheduler<DemoWorld> {
        &self.scheduler
    }

    /// Returns the demo world.
    pub fn world(&self) -> &DemoWorld {
        self.scheduler.environment()
    }

    /// Returns a copy of the journal so far.
    pub fn journal(&self) -> Vec<JournalEntry> {
        self.journal.borrow().clone()
    }
}
