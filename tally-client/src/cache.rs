use std::sync::Arc;

use dashmap::DashMap;
use tally_lib::account::AccountId;

/// Explicitly shared cache of initialized contract handles, keyed by the
/// contract's account id.
///
/// Passed by reference to whatever controller needs it; no module-level
/// state. `reset` drops every handle so a fresh scenario re-initializes from
/// scratch.
pub struct ContractCache<T> {
    entries: DashMap<AccountId, Arc<T>>,
}

impl<T> ContractCache<T> {
    pub fn new() -> Self {
        ContractCache {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, id: &AccountId) -> Option<Arc<T>> {
        self.entries.get(id).map(|entry| entry.clone())
    }

    /// Returns the cached handle for `id`, initializing it with `init` on
    /// first access.
    pub fn get_or_init(&self, id: &AccountId, init: impl FnOnce() -> T) -> Arc<T> {
        self.entries
            .entry(id.clone())
            .or_insert_with(|| Arc::new(init()))
            .clone()
    }

    /// Drops the handle for `id`. Returns whether one was cached.
    pub fn invalidate(&self, id: &AccountId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Drops every handle, for test isolation between scenarios.
    pub fn reset(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ContractCache<T> {
    fn default() -> Self {
        ContractCache::new()
    }
}
