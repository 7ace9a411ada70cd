//! Unique bug registry.
//!
//! The scoreboard records every input combination whose observed output
//! diverged from the reference model. Each combination is recorded once, no
//! matter how often it fails, so the registry size is the number of distinct
//! failing combinations.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::common::data::BugKey;

/// Set of failing input combinations, writable by its single owner.
///
/// Not `Clone`. The scoreboard owns it; other components hold a
/// [`RegistryView`].
#[derive(Debug, Default)]
pub struct BugRegistry {
    keys: Arc<Mutex<BTreeSet<BugKey>>>,
}

impl BugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`, returning `true` if it was not already present.
    pub fn record(&mut self, key: BugKey) -> bool {
        lock(&self.keys).insert(key)
    }

    pub fn contains(&self, key: &BugKey) -> bool {
        lock(&self.keys).contains(key)
    }

    pub fn len(&self) -> usize {
        lock(&self.keys).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a read-only handle onto the same set.
    pub fn view(&self) -> RegistryView {
        RegistryView {
            keys: Arc::clone(&self.keys),
        }
    }
}

/// Read-only handle onto a [`BugRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryView {
    keys: Arc<Mutex<BTreeSet<BugKey>>>,
}

impl RegistryView {
    pub fn contains(&self, key: &BugKey) -> bool {
        lock(&self.keys).contains(key)
    }

    /// Number of distinct failing combinations recorded so far.
    pub fn len(&self) -> usize {
        lock(&self.keys).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the recorded keys in `(a, b, op)` order.
    pub fn keys(&self) -> Vec<BugKey> {
        lock(&self.keys).iter().copied().collect()
    }
}

fn lock(keys: &Mutex<BTreeSet<BugKey>>) -> MutexGuard<'_, BTreeSet<BugKey>> {
    keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_idempotent() {
        let mut registry = BugRegistry::new();
        assert!(registry.record(BugKey::new(5, 3, 0)));
        assert!(!registry.record(BugKey::new(5, 3, 0)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn view_tracks_owner() {
        let mut registry = BugRegistry::new();
        let view = registry.view();
        assert!(view.is_empty());

        registry.record(BugKey::new(10, 10, 0));
        registry.record(BugKey::new(1, 2, 3));
        assert_eq!(view.len(), 2);
        assert!(view.contains(&BugKey::new(10, 10, 0)));
        assert_eq!(
            view.keys(),
            vec![BugKey::new(1, 2, 3), BugKey::new(10, 10, 0)]
        );
    }
}
