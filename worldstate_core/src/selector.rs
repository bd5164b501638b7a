//! Weighted event selection with consecutive-repeat avoidance.
//!
//! The selector is a pure function of the catalog, the category of the event
//! that finished last, and a single uniform draw from the caller's RNG. It is
//! the only place randomness enters the choice of *which* event runs.
//!
//! # Algorithm
//!
//! ```text
//! pool   = entries with (no previous) | repeatable | category != previous
//! pool   = catalog                     if pool is empty
//! w_i    = max(weight_i, WEIGHT_FLOOR)
//! r      ~ U[0, sum(w_i)]
//! choice = first entry whose running sum >= r   (last entry if none)
//! ```

use rand::Rng;
use worldstate_env::{EventCategory, EventDefinition};

/// Weight given to definitions whose weight is zero, negative or not finite.
pub const WEIGHT_FLOOR: f64 = 0.0001;

/// Returns the weight used for selection.
pub fn selection_weight(def: &EventDefinition) -> f64 {
    if def.weight.is_finite() {
        def.weight.max(WEIGHT_FLOOR)
    } else {
        WEIGHT_FLOOR
    }
}

/// Returns true if `def` may follow an event of category `previous`.
pub fn is_eligible(def: &EventDefinition, previous: Option<&EventCategory>) -> bool {
    match previous {
        None => true,
        Some(prev) => def.can_repeat_consecutively || &def.category != prev,
    }
}

/// Builds the candidate pool, falling back to the whole catalog when
/// repeat-avoidance would leave nothing to choose from.
pub fn eligible_pool<'a>(
    catalog: &'a [EventDefinition],
    previous: Option<&EventCategory>,
) -> Vec<&'a EventDefinition> {
    let pool: Vec<&EventDefinition> = catalog
        .iter()
        .filter(|def| is_eligible(def, previous))
        .collect();

    if pool.is_empty() {
        catalog.iter().collect()
    } else {
        pool
    }
}

/// Picks the entry whose cumulative weight first reaches `roll`.
///
/// A roll past the final accumulator (floating-point rounding) yields the
/// last entry.
pub fn pick_by_roll<'a>(pool: &[&'a EventDefinition], roll: f64) -> Option<&'a EventDefinition> {
    pick_scaled(pool, roll, 1.0)
}

fn pick_scaled<'a>(pool: &[&'a EventDefinition], roll: f64, scale: f64) -> Option<&'a EventDefinition> {
    let mut acc = 0.0;
    for &def in pool {
        acc += selection_weight(def) * scale;
        if roll <= acc {
            return Some(def);
        }
    }
    pool.last().copied()
}

/// Chooses the next event.
///
/// Returns `None` only when the catalog is empty.
pub fn select_weighted<'a, R: Rng + ?Sized>(
    catalog: &'a [EventDefinition],
    previous: Option<&EventCategory>,
    rng: &mut R,
) -> Option<&'a EventDefinition> {
    if catalog.is_empty() {
        return None;
    }

    let pool = eligible_pool(catalog, previous);
    let mut scale = 1.0;
    let mut total: f64 = pool.iter().map(|def| selection_weight(def)).sum();
    if !total.is_finite() {
        // Huge weights overflow the sum; compare them relative to the largest
        let largest = pool.iter().map(|def| selection_weight(def)).fold(WEIGHT_FLOOR, f64::max);
        scale = 1.0 / largest;
        total = pool.iter().map(|def| selection_weight(def) * scale).sum();
    }
    let roll = rng.gen_range(0.0..=total);

    pick_scaled(&pool, roll, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn def(id: &str, category: EventCategory, weight: f64, repeat: bool) -> EventDefinition {
        EventDefinition::new(id, id, category)
            .with_weight(weight)
            .repeatable(repeat)
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(select_weighted(&[], None, &mut rng).is_none());
    }

    #[test]
    fn test_weight_floor() {
        assert_eq!(selection_weight(&def("a", EventCategory::AcidRain, 0.0, true)), WEIGHT_FLOOR);
        assert_eq!(selection_weight(&def("a", EventCategory::AcidRain, -3.0, true)), WEIGHT_FLOOR);
        assert_eq!(selection_weight(&def("a", EventCategory::AcidRain, f64::NAN, true)), WEIGHT_FLOOR);
        assert_eq!(selection_weight(&def("a", EventCategory::AcidRain, 2.5, true)), 2.5);
    }

    #[test]
    fn test_huge_weights_do_not_overflow() {
        let catalog = vec![
            def("a", EventCategory::AcidRain, f64::MAX, true),
            def("b", EventCategory::LowGravity, f64::MAX, true),
            def("c", EventCategory::MeteorShower, 1.0, true),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut seen_a = 0;
        let mut seen_b = 0;
        for _ in 0..2_000 {
            match select_weighted(&catalog, None, &mut rng).unwrap().id.as_str() {
                "a" => seen_a += 1,
                "b" => seen_b += 1,
                _ => {}
            }
        }

        assert!(seen_a > 800 && seen_b > 800, "a={} b={}", seen_a, seen_b);
    }

    #[test]
    fn test_pool_excludes_non_repeatable_previous() {
        let catalog = vec![
            def("meteor", EventCategory::MeteorShower, 1.0, false),
            def("acid", EventCategory::AcidRain, 1.0, true),
        ];

        let pool = eligible_pool(&catalog, Some(&EventCategory::MeteorShower));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, "acid");

        // Repeatable entries stay eligible after themselves
        let pool = eligible_pool(&catalog, Some(&EventCategory::AcidRain));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_pool_falls_back_to_whole_catalog() {
        let catalog = vec![def("meteor", EventCategory::MeteorShower, 1.0, false)];

        let pool = eligible_pool(&catalog, Some(&EventCategory::MeteorShower));
        assert_eq!(pool.len(), 1);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let chosen = select_weighted(&catalog, Some(&EventCategory::MeteorShower), &mut rng).unwrap();
        assert_eq!(chosen.id, "meteor");
    }

    #[test]
    fn test_pick_by_roll_boundaries() {
        let a = def("a", EventCategory::MeteorShower, 1.0, true);
        let b = def("b", EventCategory::AcidRain, 1.0, true);
        let pool = vec![&a, &b];

        // Ties go to the earlier entry
        assert_eq!(pick_by_roll(&pool, 0.0).unwrap().id, "a");
        assert_eq!(pick_by_roll(&pool, 1.0).unwrap().id, "a");
        assert_eq!(pick_by_roll(&pool, 1.0001).unwrap().id, "b");
        assert_eq!(pick_by_roll(&pool, 2.0).unwrap().id, "b");

        // Rounding overshoot still yields the last entry
        assert_eq!(pick_by_roll(&pool, 2.0 + 1e-9).unwrap().id, "b");
        assert!(pick_by_roll(&[], 0.5).is_none());
    }

    #[test]
    fn test_never_repeats_non_repeatable_when_alternative_exists() {
        let catalog = vec![
            def("meteor", EventCategory::MeteorShower, 100.0, false),
            def("gravity", EventCategory::LowGravity, 0.001, true),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..1_000 {
            let chosen = select_weighted(&catalog, Some(&EventCategory::MeteorShower), &mut rng).unwrap();
            assert_eq!(chosen.category, EventCategory::LowGravity);
        }
    }

    #[test]
    fn test_weighted_distribution_three_to_one() {
        let catalog = vec![
            def("heavy", EventCategory::AcidRain, 3.0, true),
            def("light", EventCategory::LowGravity, 1.0, true),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        let draws = 40_000;
        let heavy = (0..draws)
            .filter(|_| select_weighted(&catalog, None, &mut rng).unwrap().id == "heavy")
            .count();

        let ratio = heavy as f64 / (draws - heavy) as f64;
        assert!((ratio - 3.0).abs() < 0.15, "observed ratio {:.3}", ratio);
    }

    #[test]
    fn test_all_zero_weights_still_select() {
        let catalog = vec![
            def("a", EventCategory::MeteorShower, 0.0, true),
            def("b", EventCategory::AcidRain, 0.0, true),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut seen_a = false;
        let mut seen_b = false;
        for _ in 0..500 {
            match select_weighted(&catalog, None, &mut rng).unwrap().id.as_str() {
                "a" => seen_a = true,
                _ => seen_b = true,
            }
        }
        assert!(seen_a && seen_b);
    }

    #[test]
    fn test_selection_is_deterministic_per_seed() {
        let catalog = crate::catalog::default_catalog();
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..50 {
            let a = select_weighted(&catalog, None, &mut rng1).unwrap();
            let b = select_weighted(&catalog, None, &mut rng2).unwrap();
            assert_eq!(a.id, b.id);
        }
    }
}
