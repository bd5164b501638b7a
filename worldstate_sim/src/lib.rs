//! WorldState deterministic simulation harness
//!
//! Runs the event scheduler against a small demo world on a virtual clock.
//! Every source of randomness derives from one 64-bit seed:
//! - **Selection**: the scheduler's RNG is seeded with the master seed
//! - **Physics**: meteor impact targeting uses a derived seed
//! - **Time**: the clock only advances in fixed `1 / tick_rate` steps
//!
//! # Usage
//!
//! ```
//! use worldstate_sim::{SimConfig, SimRunner};
//!
//! let config = SimConfig {
//!     seed: 7,
//!     ..Default::default()
//! };
//!
//! let result = SimRunner::new(config).with_duration(30.0).run();
//! assert_eq!(result.total_ticks, 300);
//! assert!(result.stats.events_started >= 1);
//! ```

pub mod demo_world;
pub mod error;
pub mod exporter;
pub mod runner;
pub mod triggers;
pub mod world;

pub use demo_world::{DemoEntity, DemoWorld, WorldSnapshot, IMPACT_DAMAGE_PARAM};
pub use error::SimError;
pub use exporter::{SimExport, SimFrame};
pub use runner::{RunResult, SimRunner};
pub use triggers::{ForcedTrigger, TriggerQueue};
pub use world::{JournalEntry, JournalKind, SimConfig, SimWorld};
