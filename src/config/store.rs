//! In-memory settings store with per-key observers

use crate::core::{Broadcaster, ConfigStore, EventSource, Subscription};
use log::trace;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

/// Integer settings with change notification
///
/// Observers are notified after the value is stored, with no borrow held,
/// so they can read the store from their callback.
#[derive(Default)]
pub struct SettingsStore {
    values: RefCell<BTreeMap<String, i32>>,
    observers: RefCell<HashMap<String, Broadcaster<()>>>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: BTreeMap<String, i32>) -> Self {
        Self {
            values: RefCell::new(values),
            observers: RefCell::new(HashMap::new()),
        }
    }

    /// Copy of all stored values
    pub fn snapshot(&self) -> BTreeMap<String, i32> {
        self.values.borrow().clone()
    }

    /// Replace every value with `values`, notifying only keys that changed
    /// (including keys that disappeared). Returns the number of changed keys.
    pub fn apply(&self, values: &BTreeMap<String, i32>) -> usize {
        let changed: Vec<String> = {
            let mut current = self.values.borrow_mut();
            let mut changed: Vec<String> = values
                .iter()
                .filter(|(key, value)| current.get(*key) != Some(*value))
                .map(|(key, _)| key.clone())
                .collect();
            changed.extend(
                current
                    .keys()
                    .filter(|key| !values.contains_key(*key))
                    .cloned(),
            );
            *current = values.clone();
            changed
        };

        for key in &changed {
            self.notify(key);
        }
        changed.len()
    }

    fn notify(&self, key: &str) {
        let observers = self.observers.borrow().get(key).cloned();
        if let Some(observers) = observers {
            trace!("Setting '{}' changed, notifying {} observer(s)", key, observers.subscriber_count());
            observers.emit(&());
        }
    }
}

impl ConfigStore for SettingsStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.borrow().get(key).copied().unwrap_or(default)
    }

    fn put_int(&self, key: &str, value: i32) {
        self.values.borrow_mut().insert(key.to_string(), value);
        self.notify(key);
    }

    fn subscribe(&self, key: &str, mut on_change: Box<dyn FnMut()>) -> Subscription {
        let observers = self
            .observers
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .clone();
        observers.subscribe(Box::new(move |_: &()| on_change()))
    }
}
