//! The environment contract the scheduler drives.

use crate::types::EventDefinition;

/// The interface through which event effects reach the world.
///
/// The scheduler never inspects the environment's state. It only calls these
/// three operations, synchronously, from inside `update` and `trigger_now`.
///
/// # Implementations
///
/// - **Null**: `NullEnvironment` - ignores every call
/// - **Recording**: `RecordingEnvironment` - journals calls for tests
/// - **Demo**: `DemoWorld` in `worldstate_sim` - spawns, damage, gravity
///
/// # Call order
///
/// ```text
/// begin:  apply(def)  -> start observers
/// active: tick(dt)    -> progress observers   (every update)
/// end:    revert(def) -> end observers
/// ```
pub trait WorldEnvironment {
    /// Begins the effects of an event.
    ///
    /// Called exactly once per event start, before start observers fire.
    /// The definition already has its duration and intensity floors applied.
    fn apply(&mut self, def: &EventDefinition);

    /// Undoes the effects of an event.
    ///
    /// Called exactly once per event end, before end observers fire. Must be
    /// safe to call even if `apply` only partially took effect.
    fn revert(&mut self, def: &EventDefinition);

    /// Advances continuous effects by `dt` seconds.
    ///
    /// Called once per update while an event is active, never otherwise.
    fn tick(&mut self, dt: f64);
}

impl<E: WorldEnvironment + ?Sized> WorldEnvironment for Box<E> {
    fn apply(&mut self, def: &EventDefinition) {
        (**self).apply(def);
    }

    fn revert(&mut self, def: &EventDefinition) {
        (**self).revert(def);
    }

    fn tick(&mut self, dt: f64) {
        (**self).tick(dt);
    }
}

impl<E: WorldEnvironment + ?Sized> WorldEnvironment for &mut E {
    fn apply(&mut self, def: &EventDefinition) {
        (**self).apply(def);
    }

    fn revert(&mut self, def: &EventDefinition) {
        (**self).revert(def);
    }

    fn tick(&mut self, dt: f64) {
        (**self).tick(dt);
    }
}
