//! Error types for the simulation harness.

use thiserror::Error;
use worldstate_core::LoadError;
use worldstate_env::EnvError;

/// Errors raised while configuring or exporting a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Catalog or scheduler configuration could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),
    
    /// Category name was not recognized
    #[error(transparent)]
    Env(#[from] EnvError),
    
    /// Forced trigger string was malformed
    #[error("Invalid trigger: {0}")]
    InvalidTrigger(String),
    
    /// Export file could not be written
    #[error("Failed to write export {path}: {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
