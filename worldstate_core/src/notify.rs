//! Observer registries for event start, progress and end.

use worldstate_env::EventDefinition;

/// Called with the activated definition when an event starts.
pub type StartObserver = Box<dyn FnMut(&EventDefinition)>;

/// Called with the active definition and progress in `[0, 1]` on every
/// active update.
pub type TickObserver = Box<dyn FnMut(&EventDefinition, f64)>;

/// Called with the ending definition when an event ends.
pub type EndObserver = Box<dyn FnMut(&EventDefinition)>;

/// Three independent, ordered observer lists.
///
/// Observers run synchronously in registration order. A panicking observer
/// unwinds through the scheduler's `update` call.
#[derive(Default)]
pub struct Observers {
    start: Vec<StartObserver>,
    tick: Vec<TickObserver>,
    end: Vec<EndObserver>,
}

impl Observers {
    /// Creates empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start<F>(&mut self, observer: F)
    where
        F: FnMut(&EventDefinition) + 'static,
    {
        self.start.push(Box::new(observer));
    }

    pub fn on_tick<F>(&mut self, observer: F)
    where
        F: FnMut(&EventDefinition, f64) + 'static,
    {
        self.tick.push(Box::new(observer));
    }

    pub fn on_end<F>(&mut self, observer: F)
    where
        F: FnMut(&EventDefinition) + 'static,
    {
        self.end.push(Box::new(observer));
    }

    pub fn notify_start(&mut self, def: &EventDefinition) {
        for observer in &mut self.start {
            observer(def);
        }
    }

    pub fn notify_tick(&mut self, def: &EventDefinition, progress: f64) {
        for observer in &mut self.tick {
            observer(def, progress);
        }
    }

    pub fn notify_end(&mut self, def: &EventDefinition) {
        for observer in &mut self.end {
            observer(def);
        }
    }

    /// Returns the total number of registered observers.
    pub fn len(&self) -> usize {
        self.start.len() + self.tick.len() + self.end.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every registered observer.
    pub fn clear(&mut self) {
        self.start.clear();
        self.tick.clear();
        self.end.clear();
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("start", &self.start.len())
            .field("tick", &self.tick.len())
            .field("end", &self.end.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use worldstate_env::EventCategory;

    #[test]
    fn test_observers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            observers.on_start(move |def| log.borrow_mut().push(format!("{}:{}", tag, def.id)));
        }

        let def = EventDefinition::new("acid", "Acid Rain", EventCategory::AcidRain);
        observers.notify_start(&def);

        assert_eq!(*log.borrow(), vec!["first:acid", "second:acid", "third:acid"]);
    }

    #[test]
    fn test_observer_lists_are_independent() {
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let ends = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();

        {
            let ticks = Rc::clone(&ticks);
            observers.on_tick(move |_, p| ticks.borrow_mut().push(p));
        }
        {
            let ends = Rc::clone(&ends);
            observers.on_end(move |_| *ends.borrow_mut() += 1);
        }

        let def = EventDefinition::new("boost", "Resource Bloom", EventCategory::ResourceBoost);
        observers.notify_start(&def);
        observers.notify_tick(&def, 0.25);
        observers.notify_tick(&def, 0.5);

        assert_eq!(*ticks.borrow(), vec![0.25, 0.5]);
        assert_eq!(*ends.borrow(), 0);

        observers.notify_end(&def);
        assert_eq!(*ends.borrow(), 1);
    }

    #[test]
    fn test_observers_clear() {
        let mut observers = Observers::new();
        observers.on_start(|_| {});
        observers.on_tick(|_, _| {});
        observers.on_end(|_| {});
        assert_eq!(observers.len(), 3);

        observers.clear();
        assert!(observers.is_empty());
        assert_eq!(format!("{:?}", observers), "Observers { start: 0, tick: 0, end: 0 }");
    }
}
