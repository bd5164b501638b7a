//! WorldState Environment Contract
//!
//! This crate provides the narrow boundary between the event scheduler and
//! whatever world it drives. The scheduler decides *which* event runs and
//! *when*; an implementation of [`WorldEnvironment`] decides what the event
//! actually does (spawning meteors, damaging entities, scaling gravity).
//!
//! # Contents
//!
//! - [`EventDefinition`], [`EventCategory`], [`EffectParams`]: event data
//! - [`WorldEnvironment`]: apply / revert / tick
//! - [`NullEnvironment`], [`RecordingEnvironment`]: ready-made implementations
//!
//! # Example
//!
//! ```
//! use worldstate_env::{EventCategory, EventDefinition, RecordingEnvironment, WorldEnvironment};
//!
//! let mut env = RecordingEnvironment::new();
//! let def = EventDefinition::new("acid", "Acid Rain", EventCategory::AcidRain);
//!
//! env.apply(&def);
//! env.tick(0.1);
//! env.revert(&def);
//!
//! assert_eq!(env.calls().len(), 3);
//! ```

mod environment;
mod error;
mod recording;
mod types;

pub use environment::WorldEnvironment;
pub use error::EnvError;
pub use recording::{EnvCall, NullEnvironment, RecordingEnvironment};
pub use types::{EffectParams, EventCategory, EventDefinition};
