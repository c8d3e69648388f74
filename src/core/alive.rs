//! Tracks which polling tasks are still running.
//!
//! Each task registers its endpoint name on entry and deregisters on exit;
//! the scheduler snapshots the set when the shutdown grace elapses to name
//! the stuck tasks in [`RuntimeError::GraceExceeded`](crate::RuntimeError).

use std::collections::HashSet;
use std::sync::RwLock;

pub(crate) struct AliveSet {
    names: RwLock<HashSet<String>>,
}

impl AliveSet {
    pub(crate) fn new() -> Self {
        Self {
            names: RwLock::new(HashSet::new()),
        }
    }

    pub(crate) fn insert(&self, name: &str) {
        self.names
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.to_string());
    }

    pub(crate) fn remove(&self, name: &str) {
        self.names
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name);
    }

    /// Sorted snapshot of still-registered task names.
    pub(crate) fn snapshot(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .names
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }
}
