//! Errors raised while loading catalogs and configuration.
//!
//! The scheduler itself has no error path; these only come from file input.

use thiserror::Error;

/// Failure to load a catalog or scheduler configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    
    /// File contents were not valid JSON for the expected shape
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    
    /// Catalog file parsed but held no definitions
    #[error("Catalog {0} contains no event definitions")]
    EmptyCatalog(String),
}

impl LoadError {
    /// Creates an I/O error tagged with the offending path.
    pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}
