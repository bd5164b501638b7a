//! Demonstration world for simulation runs.
//!
//! `DemoWorld` is a small stand-in for a game world. It realizes every
//! built-in event category:
//! - Hazard counts for meteor showers and vine overgrowth
//! - Periodic acid-rain damage to every entity
//! - Seeded meteor impacts on random entities
//! - Gravity and resource-yield multipliers

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use worldstate_env::{EventCategory, EventDefinition, WorldEnvironment};

/// Parameter key for per-impact meteor damage.
pub const IMPACT_DAMAGE_PARAM: &str = "impact_damage";

/// Shortest gap between acid-rain damage pulses (seconds).
const MIN_ACID_INTERVAL: f64 = 0.15;

/// Acid-rain damage per pulse at intensity 1.
const BASE_ACID_DAMAGE: f64 = 5.0;

/// Meteor damage per impact when the definition does not set one.
const DEFAULT_IMPACT_DAMAGE: f64 = 10.0;

/// An entity that can take damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoEntity {
    pub id: u64,
    pub health: f64,
}

impl DemoEntity {
    pub fn new(id: u64, health: f64) -> Self {
        Self { id, health }
    }

    /// Reduces health, never below zero.
    pub fn apply_damage(&mut self, amount: f64) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// A damage source that fires every `interval` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pulse {
    timer: f64,
    interval: f64,
    damage: f64,
}

impl Pulse {
    fn new(interval: f64, damage: f64) -> Self {
        Self {
            timer: 0.0,
            interval,
            damage,
        }
    }

    /// Accumulates `dt`; returns true when the pulse fires.
    fn advance(&mut self, dt: f64) -> bool {
        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }
}

/// Observable state of the demo world at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub gravity_scale: f64,
    pub resource_multiplier: f64,
    pub active_meteors: u32,
    pub active_vines: u32,
    pub acid_rain: bool,
    pub entity_health: Vec<f64>,
}

/// The demo world.
pub struct DemoWorld {
    /// Gravity multiplier (1.0 = normal, lower is floatier)
    pub gravity_scale: f64,

    /// Resource yield multiplier
    pub resource_multiplier: f64,

    /// Meteors currently spawned
    pub active_meteors: u32,

    /// Vines currently spawned
    pub active_vines: u32,

    /// Entities receiving damage
    entities: Vec<DemoEntity>,

    /// Acid rain pulse while active
    acid_rain: Option<Pulse>,

    /// Meteor impact pulse while a shower is active
    meteor_impacts: Option<Pulse>,

    /// RNG for impact targeting
    physics_rng: ChaCha8Rng,
}

impl DemoWorld {
    /// Creates the default world: three entities at 120, 80 and 150 health.
    pub fn new(physics_seed: u64) -> Self {
        Self::with_entities(
            physics_seed,
            vec![
                DemoEntity::new(0, 120.0),
                DemoEntity::new(1, 80.0),
                DemoEntity::new(2, 150.0),
            ],
        )
    }

    /// Creates a world with the given entities.
    pub fn with_entities(physics_seed: u64, entities: Vec<DemoEntity>) -> Self {
        Self {
            gravity_scale: 1.0,
            resource_multiplier: 1.0,
            active_meteors: 0,
            active_vines: 0,
            entities,
            acid_rain: None,
            meteor_impacts: None,
            physics_rng: ChaCha8Rng::seed_from_u64(physics_seed),
        }
    }

    pub fn entities(&self) -> &[DemoEntity] {
        &self.entities
    }

    /// Returns true while acid rain is falling.
    pub fn acid_rain_active(&self) -> bool {
        self.acid_rain.is_some()
    }

    /// Returns the number of entities with health left.
    pub fn alive_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_alive()).count()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            gravity_scale: self.gravity_scale,
            resource_multiplier: self.resource_multiplier,
            active_meteors: self.active_meteors,
            active_vines: self.active_vines,
            acid_rain: self.acid_rain_active(),
            entity_health: self.entities.iter().map(|e| e.health).collect(),
        }
    }

    fn damage_all(&mut self, amount: f64) {
        for entity in &mut self.entities {
            entity.apply_damage(amount);
        }
    }

    fn damage_random(&mut self, amount: f64) {
        if self.entities.is_empty() {
            return;
        }
        let idx = self.physics_rng.gen_range(0..self.entities.len());
        self.entities[idx].apply_damage(amount);
    }
}

impl WorldEnvironment for DemoWorld {
    fn apply(&mut self, def: &EventDefinition) {
        let intensity = def.intensity.max(0.1);

        match &def.category {
            EventCategory::MeteorShower => {
                self.active_meteors += def.effect.spawn_count;
                let damage = def.effect.get(IMPACT_DAMAGE_PARAM).unwrap_or(DEFAULT_IMPACT_DAMAGE);
                self.meteor_impacts = Some(Pulse::new(1.0 / intensity, damage));
            }
            EventCategory::VineOvergrowth => {
                self.active_vines += def.effect.spawn_count;
            }
            EventCategory::AcidRain => {
                let interval = (1.0 / intensity).max(MIN_ACID_INTERVAL);
                self.acid_rain = Some(Pulse::new(interval, BASE_ACID_DAMAGE * intensity));
            }
            EventCategory::LowGravity => {
                self.gravity_scale = 0.4 / def.intensity.max(0.4);
            }
            EventCategory::ResourceBoost => {
                self.resource_multiplier = 1.0 + 0.5 * intensity;
            }
            EventCategory::Custom(_) => {}
        }
    }

    fn revert(&mut self, def: &EventDefinition) {
        match &def.category {
            EventCategory::MeteorShower => {
                self.active_meteors = 0;
                self.meteor_impacts = None;
            }
            EventCategory::VineOvergrowth => self.active_vines = 0,
            EventCategory::AcidRain => self.acid_rain = None,
            EventCategory::LowGravity => self.gravity_scale = 1.0,
            EventCategory::ResourceBoost => self.resource_multiplier = 1.0,
            EventCategory::Custom(_) => {}
        }
    }

    fn tick(&mut self, dt: f64) {
        if let Some(damage) = fire(&mut self.acid_rain, dt) {
            self.damage_all(damage);
        }
        if let Some(damage) = fire(&mut self.meteor_impacts, dt) {
            self.damage_random(damage);
        }
    }
}

fn fire(pulse: &mut Option<Pulse>, dt: f64) -> Option<f64> {
    let pulse = pulse.as_mut()?;
    pulse.advance(dt).then_some(pulse.damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn def(category: EventCategory, intensity: f64) -> EventDefinition {
        EventDefinition::new("t", "Test", category).with_intensity(intensity)
    }

    #[test]
    fn test_meteor_shower_spawns_and_clears() {
        let mut world = DemoWorld::new(42);
        let meteor = def(EventCategory::MeteorShower, 1.0).with_spawn(25, 45.0);

        world.apply(&meteor);
        assert_eq!(world.active_meteors, 25);

        world.revert(&meteor);
        assert_eq!(world.active_meteors, 0);
    }

    #[test]
    fn test_acid_rain_damages_on_interval() {
        let mut world = DemoWorld::new(42);
        let acid = def(EventCategory::AcidRain, 2.0);

        world.apply(&acid);
        assert!(world.acid_rain_active());

        // Interval 0.5s, damage 10 per pulse
        world.tick(0.25);
        assert_eq!(world.snapshot().entity_health, vec![120.0, 80.0, 150.0]);
        world.tick(0.25);
        assert_eq!(world.snapshot().entity_health, vec![110.0, 70.0, 140.0]);

        world.revert(&acid);
        world.tick(5.0);
        assert_eq!(world.snapshot().entity_health, vec![110.0, 70.0, 140.0]);
    }

    #[test]
    fn test_acid_rain_interval_floor() {
        let mut world = DemoWorld::with_entities(1, vec![DemoEntity::new(0, 100.0)]);
        world.apply(&def(EventCategory::AcidRain, 50.0));

        // 1/50 would be 0.02s; floored to 0.15s
        world.tick(0.1);
        assert_eq!(world.entities()[0].health, 100.0);
        world.tick(0.05);
        assert_eq!(world.entities()[0].health, 0.0);
    }

    #[test]
    fn test_gravity_and_resources() {
        let mut world = DemoWorld::new(42);

        let gravity = def(EventCategory::LowGravity, 1.0);
        world.apply(&gravity);
        assert_relative_eq!(world.gravity_scale, 0.4);
        world.revert(&gravity);
        assert_eq!(world.gravity_scale, 1.0);

        let weak = def(EventCategory::LowGravity, 0.1);
        world.apply(&weak);
        assert_relative_eq!(world.gravity_scale, 1.0);

        let boost = def(EventCategory::ResourceBoost, 1.5);
        world.apply(&boost);
        assert_relative_eq!(world.resource_multiplier, 1.75);
        world.revert(&boost);
        assert_eq!(world.resource_multiplier, 1.0);
    }

    #[test]
    fn test_meteor_impacts_are_seeded() {
        let meteor = def(EventCategory::MeteorShower, 1.0).with_param(IMPACT_DAMAGE_PARAM, 30.0);

        let run = |seed: u64| {
            let mut world = DemoWorld::new(seed);
            world.apply(&meteor);
            for _ in 0..10 {
                world.tick(1.0);
            }
            world.snapshot().entity_health
        };

        let health = run(7);
        let lost: f64 = 350.0 - health.iter().sum::<f64>();
        assert!(lost > 0.0);
        assert_eq!(health, run(7));
    }

    #[test]
    fn test_entity_health_clamps_at_zero() {
        let mut entity = DemoEntity::new(0, 5.0);
        entity.apply_damage(12.0);
        assert_eq!(entity.health, 0.0);
        assert!(!entity.is_alive());
    }

    #[test]
    fn test_custom_category_has_no_effect() {
        let mut world = DemoWorld::new(42);
        let quake = def(EventCategory::Custom("quake".to_string()), 3.0);
        let before = world.snapshot();

        world.apply(&quake);
        world.tick(1.0);
        world.revert(&quake);

        assert_eq!(world.snapshot(), before);
    }
}
