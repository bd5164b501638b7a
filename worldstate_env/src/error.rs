//! Error types for the WorldState environment layer.

use thiserror::Error;

/// Errors raised when parsing collaborator input.
///
/// The scheduler itself never fails.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Category name did not match any known kind
    #[error("Unknown event category: {0}")]
    UnknownCategory(String),
}

impl EnvError {
    /// Creates an unknown-category error.
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory(name.into())
    }
}
