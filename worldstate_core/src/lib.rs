//! WorldState Core - timed, weighted, repeat-avoiding world events
//!
//! This library decides which environmental event is active, for how long,
//! and how often new ones occur:
//! 1. **Selector**: weighted random choice that avoids repeating a
//!    non-repeatable category back to back
//! 2. **Scheduler**: delay → active → interval → active… state machine,
//!    advanced only by explicit `update(dt)` calls
//! 3. **Observers**: start / progress / end callbacks invoked synchronously
//!
//! Effects themselves live behind [`worldstate_env::WorldEnvironment`].
//!
//! # Example
//!
//! ```
//! use worldstate_core::{default_catalog, EventScheduler, SchedulerState};
//! use worldstate_env::NullEnvironment;
//!
//! let mut scheduler = EventScheduler::with_seed(NullEnvironment, 42);
//! scheduler.set_catalog(default_catalog());
//! scheduler.on_start(|def| println!("started {}", def.display_name));
//! scheduler.start();
//!
//! for _ in 0..100 {
//!     scheduler.update(0.1);
//! }
//! assert_eq!(scheduler.state(), SchedulerState::EventActive);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod scheduler;
pub mod selector;
pub mod stats;

// Re-export key types for convenience
pub use catalog::{default_catalog, load_catalog, parse_catalog};
pub use config::{SchedulerConfig, TimeRange};
pub use error::LoadError;
pub use notify::Observers;
pub use scheduler::{activate, EventScheduler, SchedulerState, MIN_DURATION_SECS, MIN_INTENSITY};
pub use selector::{select_weighted, WEIGHT_FLOOR};
pub use stats::SchedulerStats;
