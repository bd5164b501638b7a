//! Environments that ship with the contract: a no-op one and a recorder.

use crate::environment::WorldEnvironment;
use crate::types::{EventCategory, EventDefinition};

/// Environment that ignores every call.
///
/// Useful when only the observer stream matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEnvironment;

impl WorldEnvironment for NullEnvironment {
    fn apply(&mut self, _def: &EventDefinition) {}

    fn revert(&mut self, _def: &EventDefinition) {}

    fn tick(&mut self, _dt: f64) {}
}

/// One call received by a `RecordingEnvironment`.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvCall {
    /// `apply` with the definition as received
    Apply(EventDefinition),

    /// `revert` with the definition as received
    Revert(EventDefinition),

    /// `tick` with its delta
    Tick(f64),
}

/// Environment double that journals every call in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingEnvironment {
    calls: Vec<EnvCall>,
}

impl RecordingEnvironment {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every call received so far.
    pub fn calls(&self) -> &[EnvCall] {
        &self.calls
    }

    /// Returns the definitions passed to `apply`, in order.
    pub fn applied(&self) -> Vec<&EventDefinition> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EnvCall::Apply(def) => Some(def),
                _ => None,
            })
            .collect()
    }

    /// Returns the definitions passed to `revert`, in order.
    pub fn reverted(&self) -> Vec<&EventDefinition> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EnvCall::Revert(def) => Some(def),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of `tick` calls.
    pub fn tick_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, EnvCall::Tick(_))).count()
    }

    /// Returns the category applied but not yet reverted, if any.
    ///
    /// Assumes strictly alternating apply/revert, which the scheduler guarantees.
    pub fn active_category(&self) -> Option<&EventCategory> {
        let mut active = None;
        for call in &self.calls {
            match call {
                EnvCall::Apply(def) => active = Some(&def.category),
                EnvCall::Revert(_) => active = None,
                EnvCall::Tick(_) => {}
            }
        }
        active
    }

    /// Discards the journal.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl WorldEnvironment for RecordingEnvironment {
    fn apply(&mut self, def: &EventDefinition) {
        self.calls.push(EnvCall::Apply(def.clone()));
    }

    fn revert(&mut self, def: &EventDefinition) {
        self.calls.push(EnvCall::Revert(def.clone()));
    }

    fn tick(&mut self, dt: f64) {
        self.calls.push(EnvCall::Tick(dt));
    }
}
