//! The event scheduler - a pull-driven lifecycle state machine.
//!
//! ```text
//!              start()
//!                 │
//!        ┌────────▼────────┐   countdown <= 0   ┌───────────────┐
//!        │ WaitingToStart  ├───────────────────►│               │
//!        └─────────────────┘                    │  EventActive  │
//!        ┌─────────────────────┐ countdown <= 0 │               │
//!        │ WaitingBetweenEvents├───────────────►│               │
//!        └──────────▲──────────┘                └───────┬───────┘
//!                   │         elapsed >= duration       │
//!                   └───────────────────────────────────┘
//!
//!   trigger_now(category): from any state, end the active event (if any)
//!   and force the first catalog entry of that category active.
//! ```
//!
//! Nothing happens between calls. Each `update(dt)` advances the timers by
//! `dt`, performs at most one transition and runs every resulting
//! environment call and observer synchronously.

use crate::config::SchedulerConfig;
use crate::notify::Observers;
use crate::selector::select_weighted;
use crate::stats::SchedulerStats;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use worldstate_env::{EventCategory, EventDefinition, WorldEnvironment};

/// Floor applied to an activated event's duration (seconds).
pub const MIN_DURATION_SECS: f64 = 1.0;

/// Floor applied to an activated event's intensity.
pub const MIN_INTENSITY: f64 = 0.1;

/// Lifecycle state of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Counting down the initial delay
    WaitingToStart,

    /// An event is running
    EventActive,

    /// Counting down the gap before the next event
    WaitingBetweenEvents,
}

impl SchedulerState {
    /// Returns true for the two countdown states.
    pub fn is_waiting(&self) -> bool {
        !matches!(self, SchedulerState::EventActive)
    }
}

/// Returns the copy of `def` that actually runs.
///
/// Duration and intensity are raised to their floors; everything else,
/// including effect parameters, is passed through untouched.
pub fn activate(def: &EventDefinition) -> EventDefinition {
    let mut active = def.clone();
    active.duration = active.duration.max(MIN_DURATION_SECS);
    active.intensity = active.intensity.max(MIN_INTENSITY);
    active
}

/// Drives world-state events over a `WorldEnvironment`.
///
/// Generic over the environment and the random source. The default RNG is a
/// per-instance `ChaCha8Rng`, so two schedulers built from the same seed
/// produce identical event sequences.
pub struct EventScheduler<E, R = ChaCha8Rng>
where
    E: WorldEnvironment,
    R: Rng,
{
    /// Effects collaborator
    env: E,

    /// Source for countdown draws and event selection
    rng: R,

    /// Delay/interval ranges
    config: SchedulerConfig,

    /// Definitions to choose from
    catalog: Vec<EventDefinition>,

    /// Start/progress/end observers
    observers: Observers,

    /// Current lifecycle state
    state: SchedulerState,

    /// Activated copy of the running event
    active: Option<EventDefinition>,

    /// Seconds spent in the active event
    elapsed: f64,

    /// Seconds left in the current waiting state (may go negative)
    countdown: f64,

    /// Category of the last event to end
    last_category: Option<EventCategory>,

    /// Lifetime counters
    stats: SchedulerStats,
}

impl<E: WorldEnvironment> EventScheduler<E, ChaCha8Rng> {
    /// Creates a scheduler seeded from OS entropy.
    pub fn new(env: E) -> Self {
        Self::with_rng(env, ChaCha8Rng::from_entropy())
    }

    /// Creates a scheduler with a deterministic seed.
    pub fn with_seed(env: E, seed: u64) -> Self {
        Self::with_rng(env, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<E, R> EventScheduler<E, R>
where
    E: WorldEnvironment,
    R: Rng,
{
    /// Creates a scheduler with an injected random source.
    ///
    /// The scheduler starts in `WaitingToStart` with a zero countdown, so an
    /// `update` before `start()` begins an event immediately.
    pub fn with_rng(env: E, rng: R) -> Self {
        Self {
            env,
            rng,
            config: SchedulerConfig::default(),
            catalog: Vec::new(),
            observers: Observers::new(),
            state: SchedulerState::WaitingToStart,
            active: None,
            elapsed: 0.0,
            countdown: 0.0,
            last_category: None,
            stats: SchedulerStats::default(),
        }
    }

    /// Replaces the timing configuration (builder style).
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the timing configuration.
    ///
    /// Takes effect at the next countdown draw.
    pub fn set_config(&mut self, config: SchedulerConfig) {
        self.config = config;
    }

    /// Replaces the catalog.
    ///
    /// A running event is a detached copy and keeps running unaffected.
    pub fn set_catalog(&mut self, catalog: Vec<EventDefinition>) {
        debug!("Catalog replaced: {} definitions", catalog.len());
        self.catalog = catalog;
    }

    /// Registers a start observer.
    pub fn on_start<F>(&mut self, observer: F)
    where
        F: FnMut(&EventDefinition) + 'static,
    {
        self.observers.on_start(observer);
    }

    /// Registers an end observer.
    pub fn on_end<F>(&mut self, observer: F)
    where
        F: FnMut(&EventDefinition) + 'static,
    {
        self.observers.on_end(observer);
    }

    /// Registers a progress observer.
    pub fn on_tick<F>(&mut self, observer: F)
    where
        F: FnMut(&EventDefinition, f64) + 'static,
    {
        self.observers.on_tick(observer);
    }

    /// Enters `WaitingToStart` with a freshly drawn initial delay.
    ///
    /// An event still running from before is ended first, so its effects are
    /// reverted and end observers fire.
    pub fn start(&mut self) {
        self.finish_active(true);

        self.state = SchedulerState::WaitingToStart;
        self.elapsed = 0.0;
        self.countdown = self.config.initial_delay.sample(&mut self.rng);

        info!("Event scheduler started: first event in {:.2}s", self.countdown);
    }

    /// Advances the scheduler by `dt` seconds.
    ///
    /// Performs at most one state transition regardless of how large `dt` is.
    pub fn update(&mut self, dt: f64) {
        match self.state {
            SchedulerState::WaitingToStart | SchedulerState::WaitingBetweenEvents => {
                self.countdown -= dt;
                if self.countdown <= 0.0 {
                    self.start_selected();
                }
            }
            SchedulerState::EventActive => self.advance_active(dt),
        }
    }

    /// Forces the first catalog entry of `category` active immediately.
    ///
    /// Returns `false` and changes nothing if the catalog has no entry of
    /// that category. Otherwise ends the running event (if any) and begins
    /// the requested one, bypassing selection and any pending countdown.
    pub fn trigger_now(&mut self, category: &EventCategory) -> bool {
        let forced = match self.catalog.iter().find(|def| &def.category == category) {
            Some(def) => def.clone(),
            None => {
                debug!("Override ignored: no definition of category {}", category);
                return false;
            }
        };

        info!("Override: forcing {} ({})", forced.display_name, category);

        if self.active.is_some() {
            self.end_active(true);
        }

        self.stats.overrides += 1;
        self.begin(&forced);
        true
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Returns the running event, if any.
    pub fn active_event(&self) -> Option<&EventDefinition> {
        self.active.as_ref()
    }

    /// Returns seconds elapsed in the running event.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Returns seconds left in the current countdown.
    ///
    /// Meaningful only while waiting; may be negative after a large step.
    pub fn countdown(&self) -> f64 {
        self.countdown
    }

    /// Returns progress of the running event in `[0, 1]`.
    pub fn progress(&self) -> Option<f64> {
        self.active.as_ref().map(|def| progress_of(self.elapsed, def.duration))
    }

    /// Returns the category of the most recently ended event.
    pub fn last_category(&self) -> Option<&EventCategory> {
        self.last_category.as_ref()
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &[EventDefinition] {
        &self.catalog
    }

    /// Returns the timing configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Returns the lifetime counters.
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Returns the observer registries.
    pub fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }

    /// Returns the environment.
    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Returns the environment mutably.
    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Consumes the scheduler, returning its environment.
    pub fn into_environment(self) -> E {
        self.env
    }

    fn advance_active(&mut self, dt: f64) {
        let finished = match self.active.as_ref() {
            Some(active) => {
                self.env.tick(dt);
                self.elapsed += dt;
                self.stats.active_secs += dt;

                let progress = progress_of(self.elapsed, active.duration);
                self.observers.notify_tick(active, progress);

                self.elapsed >= active.duration
            }
            None => false,
        };

        if finished {
            self.end_active(false);
        }
    }

    fn start_selected(&mut self) {
        let chosen = match select_weighted(&self.catalog, self.last_category.as_ref(), &mut self.rng) {
            Some(def) => def.clone(),
            None => {
                debug!("Catalog empty; staying in {:?}", self.state);
                return;
            }
        };
        self.begin(&chosen);
    }

    fn begin(&mut self, def: &EventDefinition) {
        self.elapsed = 0.0;
        self.state = SchedulerState::EventActive;

        let active = self.active.insert(activate(def));
        info!(
            "Event started: {} [{}] duration={:.1}s intensity={:.2}",
            active.display_name, active.category, active.duration, active.intensity
        );

        self.stats.record_start(&active.category);
        self.env.apply(active);
        self.observers.notify_start(active);
    }

    fn end_active(&mut self, preempted: bool) {
        if !self.finish_active(preempted) {
            return;
        }

        self.state = SchedulerState::WaitingBetweenEvents;
        self.countdown = self.config.interval.sample(&mut self.rng);

        debug!("Next event in {:.2}s", self.countdown);
    }

    /// Reverts and reports the running event. Returns false if none was running.
    fn finish_active(&mut self, preempted: bool) -> bool {
        let Some(ended) = self.active.take() else {
            return false;
        };

        info!(
            "Event ended: {} after {:.2}s{}",
            ended.display_name,
            self.elapsed,
            if preempted { " (preempted)" } else { "" }
        );

        self.env.revert(&ended);
        self.observers.notify_end(&ended);
        self.stats.record_end(preempted);

        self.last_category = Some(ended.category);
        true
    }
}

fn progress_of(elapsed: f64, duration: f64) -> f64 {
    (elapsed / duration.max(MIN_DURATION_SECS)).clamp(0.0, 1.0)
}
