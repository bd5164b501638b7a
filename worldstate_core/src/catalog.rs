//! The shipped event catalog and JSON catalog loading.

use crate::error::LoadError;
use std::path::Path;
use worldstate_env::{EventCategory, EventDefinition};

/// Returns the five built-in world-state events.
pub fn default_catalog() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new("meteor", "Meteor Shower", EventCategory::MeteorShower)
            .with_description("Meteors crash from the sky. Take cover!")
            .with_duration(25.0)
            .with_intensity(1.0)
            .with_weight(1.0)
            .repeatable(false)
            .with_spawn(25, 45.0),
        EventDefinition::new("vines", "Vine Overgrowth", EventCategory::VineOvergrowth)
            .with_description("Vines rapidly block paths and reshape routes.")
            .with_duration(30.0)
            .with_intensity(1.2)
            .with_weight(0.8)
            .repeatable(false)
            .with_spawn(18, 35.0),
        EventDefinition::new("acid", "Acid Rain", EventCategory::AcidRain)
            .with_description("Corrosive rain damages entities and structures.")
            .with_duration(20.0)
            .with_intensity(1.1)
            .with_weight(0.7)
            .repeatable(true),
        EventDefinition::new("lowgrav", "Low Gravity", EventCategory::LowGravity)
            .with_description("Gravity weakens; jumps feel floaty.")
            .with_duration(15.0)
            .with_intensity(1.0)
            .with_weight(0.5)
            .repeatable(true),
        EventDefinition::new("boost", "Resource Bloom", EventCategory::ResourceBoost)
            .with_description("Resource yields surge across the map!")
            .with_duration(25.0)
            .with_intensity(1.5)
            .with_weight(0.6)
            .repeatable(true),
    ]
}

/// Parses a JSON array of definitions.
///
/// An empty array is accepted; the scheduler tolerates empty catalogs.
pub fn parse_catalog(json: &str) -> Result<Vec<EventDefinition>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Loads a catalog file, rejecting files with no definitions.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<EventDefinition>, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| LoadError::io(path.display(), e))?;
    let catalog = parse_catalog(&json)?;

    if catalog.is_empty() {
        return Err(LoadError::EmptyCatalog(path.display().to_string()));
    }
    Ok(catalog)
}
