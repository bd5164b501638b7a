//! Event data types shared between the scheduler and its environments.

use crate::error::EnvError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of world-state event.
///
/// The five built-in kinds cover the shipped catalog. Collaborators that need
/// more kinds use `Custom`, which compares by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Meteors crash from the sky
    MeteorShower,

    /// Vines block paths and reshape routes
    VineOvergrowth,

    /// Corrosive rain damages entities over time
    AcidRain,

    /// Gravity weakens
    LowGravity,

    /// Resource yields surge
    ResourceBoost,

    /// Collaborator-defined kind
    Custom(String),
}

impl EventCategory {
    /// Returns the built-in categories in declaration order.
    pub fn builtin() -> Vec<EventCategory> {
        vec![
            EventCategory::MeteorShower,
            EventCategory::VineOvergrowth,
            EventCategory::AcidRain,
            EventCategory::LowGravity,
            EventCategory::ResourceBoost,
        ]
    }

    /// Returns the canonical name of the category.
    pub fn name(&self) -> &str {
        match self {
            EventCategory::MeteorShower => "meteor_shower",
            EventCategory::VineOvergrowth => "vine_overgrowth",
            EventCategory::AcidRain => "acid_rain",
            EventCategory::LowGravity => "low_gravity",
            EventCategory::ResourceBoost => "resource_boost",
            EventCategory::Custom(name) => name,
        }
    }

    /// Returns true for collaborator-defined categories.
    pub fn is_custom(&self) -> bool {
        matches!(self, EventCategory::Custom(_))
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Custom(name) => write!(f, "custom:{}", name),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl std::str::FromStr for EventCategory {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(name) = trimmed.strip_prefix("custom:") {
            if name.is_empty() {
                return Err(EnvError::unknown_category(s));
            }
            return Ok(EventCategory::Custom(name.to_string()));
        }

        match trimmed.to_lowercase().as_str() {
            "meteor_shower" | "meteorshower" | "meteor" => Ok(EventCategory::MeteorShower),
            "vine_overgrowth" | "vineovergrowth" | "vines" => Ok(EventCategory::VineOvergrowth),
            "acid_rain" | "acidrain" | "acid" => Ok(EventCategory::AcidRain),
            "low_gravity" | "lowgravity" | "lowgrav" => Ok(EventCategory::LowGravity),
            "resource_boost" | "resourceboost" | "boost" => Ok(EventCategory::ResourceBoost),
            _ => Err(EnvError::unknown_category(s)),
        }
    }
}

/// Effect knobs carried by a definition.
///
/// The scheduler never reads these; they are handed to the environment as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    /// Number of hazards/obstacles to spawn
    #[serde(default = "default_spawn_count")]
    pub spawn_count: u32,

    /// Spawn radius in world units
    #[serde(default = "default_spawn_radius")]
    pub spawn_radius: f64,

    /// Free-form named parameters
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl EffectParams {
    /// Creates spawn parameters with no extra knobs.
    pub fn spawn(spawn_count: u32, spawn_radius: f64) -> Self {
        Self {
            spawn_count,
            spawn_radius,
            extra: BTreeMap::new(),
        }
    }

    /// Returns a named extra parameter.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.extra.get(key).copied()
    }
}

impl Default for EffectParams {
    fn default() -> Self {
        Self::spawn(default_spawn_count(), default_spawn_radius())
    }
}

fn default_spawn_count() -> u32 {
    20
}

fn default_spawn_radius() -> f64 {
    40.0
}

fn default_duration() -> f64 {
    30.0
}

fn default_intensity() -> f64 {
    1.0
}

fn default_weight() -> f64 {
    1.0
}

/// Description of one kind of world-state event.
///
/// Catalog entries are never mutated. The scheduler activates a copy with
/// duration and intensity raised to their floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDefinition {
    /// Stable identifier (e.g. "meteor")
    pub id: String,

    /// Human-readable name
    pub display_name: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Event kind
    pub category: EventCategory,

    /// Duration in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Global scaling knob for the effect
    #[serde(default = "default_intensity")]
    pub intensity: f64,

    /// Relative selection weight
    #[serde(default = "default_weight")]
    pub weight: f64,

    /// Whether the event may follow an event of its own category
    #[serde(default)]
    pub can_repeat_consecutively: bool,

    /// Parameters passed through to the environment
    #[serde(default)]
    pub effect: EffectParams,
}

impl EventDefinition {
    /// Creates a definition with default timing, weight and effect knobs.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, category: EventCategory) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            category,
            duration: default_duration(),
            intensity: default_intensity(),
            weight: default_weight(),
            can_repeat_consecutively: false,
            effect: EffectParams::default(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the duration in seconds.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    /// Sets the intensity.
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    /// Sets the selection weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Allows or forbids consecutive repeats of this category.
    pub fn repeatable(mut self, can_repeat: bool) -> Self {
        self.can_repeat_consecutively = can_repeat;
        self
    }

    /// Sets spawn count and radius.
    pub fn with_spawn(mut self, spawn_count: u32, spawn_radius: f64) -> Self {
        self.effect.spawn_count = spawn_count;
        self.effect.spawn_radius = spawn_radius;
        self
    }

    /// Adds a named effect parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.effect.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_aliases() {
        assert_eq!("meteor".parse::<EventCategory>().unwrap(), EventCategory::MeteorShower);
        assert_eq!("LowGravity".parse::<EventCategory>().unwrap(), EventCategory::LowGravity);
        assert_eq!("acid_rain".parse::<EventCategory>().unwrap(), EventCategory::AcidRain);
        assert_eq!(
            "custom:earthquake".parse::<EventCategory>().unwrap(),
            EventCategory::Custom("earthquake".to_string())
        );
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = "tsunami".parse::<EventCategory>().unwrap_err();
        assert!(matches!(err, EnvError::UnknownCategory(_)));
        assert!("custom:".parse::<EventCategory>().is_err());
    }

    #[test]
    fn test_category_display_round_trips_through_parse() {
        let mut categories = EventCategory::builtin();
        categories.push(EventCategory::Custom("solar_flare".to_string()));

        for category in categories {
            let parsed: EventCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_definition_deserialize_defaults() {
        let def: EventDefinition = serde_json::from_str(
            r#"{ "id": "quake", "display_name": "Quake", "category": { "custom": "quake" } }"#,
        )
        .unwrap();

        assert_eq!(def.category, EventCategory::Custom("quake".to_string()));
        assert_eq!(def.duration, 30.0);
        assert_eq!(def.intensity, 1.0);
        assert_eq!(def.weight, 1.0);
        assert!(!def.can_repeat_consecutively);
        assert_eq!(def.effect.spawn_count, 20);
        assert_eq!(def.effect.spawn_radius, 40.0);
    }

    #[test]
    fn test_definition_builder() {
        let def = EventDefinition::new("meteor", "Meteor Shower", EventCategory::MeteorShower)
            .with_duration(25.0)
            .with_spawn(25, 45.0)
            .with_param("impact_damage", 12.5)
            .repeatable(true);

        assert_eq!(def.duration, 25.0);
        assert_eq!(def.effect.spawn_count, 25);
        assert_eq!(def.effect.get("impact_damage"), Some(12.5));
        assert_eq!(def.effect.get("missing"), None);
        assert!(def.can_repeat_consecutively);
    }
}
