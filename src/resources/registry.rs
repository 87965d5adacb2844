//! Generic storage for effect state records.
//!
//! Every effect subsystem keeps one record per owning identity (a UI entity,
//! a relay entity, a player). [`EffectRegistry`] is that keyed collection
//! plus a [`sweep`](EffectRegistry::sweep) that evicts records whose owner
//! went away, returning them so the caller can undo their side effects.
//!
//! Registries are scoped to a level: the lifecycle observers call
//! [`reset`](EffectRegistry::reset) on map load and at round boundaries
//! instead of relying on process lifetime.
//!
//! [`SharedRegistry`] wraps a registry in `Arc<RwLock<_>>` for state that
//! other threads of the host may read or remove from while the tick runs.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EffectRegistry<K, R> {
    records: FxHashMap<K, R>,
}

impl<K, R> Default for EffectRegistry<K, R> {
    fn default() -> Self {
        EffectRegistry {
            records: FxHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash + Ord, R> EffectRegistry<K, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&R> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut R> {
        self.records.get_mut(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    /// Existing record for `key`, or a new one built by `create`.
    pub fn get_or_insert_with(&mut self, key: K, create: impl FnOnce() -> R) -> &mut R {
        self.records.entry(key).or_insert_with(create)
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, key: K, record: R) -> Option<R> {
        self.records.insert(key, record)
    }

    pub fn remove(&mut self, key: &K) -> Option<R> {
        self.records.remove(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keys in ascending order, so iteration over a snapshot is deterministic.
    pub fn keys(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.records.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &R)> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut R)> {
        self.records.iter_mut()
    }

    /// Keys of the records matching `pred`, in ascending order.
    pub fn find_keys(&self, mut pred: impl FnMut(&K, &R) -> bool) -> Vec<K> {
        let mut keys: Vec<K> = self
            .records
            .iter()
            .filter(|(key, record)| pred(key, record))
            .map(|(key, _)| *key)
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Remove every record for which `evict` returns true and hand them back.
    pub fn sweep(&mut self, mut evict: impl FnMut(&K, &R) -> bool) -> Vec<(K, R)> {
        let keys = self.find_keys(|key, record| evict(key, record));
        keys.into_iter()
            .filter_map(|key| self.records.remove(&key).map(|record| (key, record)))
            .collect()
    }

    /// Drop every record, returning them for cleanup.
    pub fn reset(&mut self) -> Vec<(K, R)> {
        self.records.drain().collect()
    }
}

/// Thread-safe, cloneable handle to an [`EffectRegistry`].
#[derive(Debug)]
pub struct SharedRegistry<K, R> {
    inner: Arc<RwLock<EffectRegistry<K, R>>>,
}

impl<K, R> Clone for SharedRegistry<K, R> {
    fn clone(&self) -> Self {
        SharedRegistry {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, R> Default for SharedRegistry<K, R> {
    fn default() -> Self {
        SharedRegistry {
            inner: Arc::new(RwLock::new(EffectRegistry::default())),
        }
    }
}

impl<K: Copy + Eq + Hash + Ord, R> SharedRegistry<K, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, EffectRegistry<K, R>> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, EffectRegistry<K, R>> {
        self.inner.write()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn remove(&self, key: &K) -> Option<R> {
        self.inner.write().remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_insert_with_keeps_existing_record() {
        let mut registry: EffectRegistry<u32, i32> = EffectRegistry::new();
        *registry.get_or_insert_with(1, || 10) += 1;
        *registry.get_or_insert_with(1, || 99) += 1;
        assert_eq!(registry.get(&1), Some(&12));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn sweep_returns_only_evicted_records() {
        let mut registry: EffectRegistry<u32, i32> = EffectRegistry::new();
        for i in 0..6 {
            registry.insert(i, i as i32 * 10);
        }
        let mut evicted = registry.sweep(|key, _| key % 2 == 0);
        evicted.sort();
        assert_eq!(evicted, vec![(0, 0), (2, 20), (4, 40)]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(&1));
        assert!(!registry.contains(&2));
    }

    #[test]
    fn reset_drains_everything() {
        let mut registry: EffectRegistry<u32, &str> = EffectRegistry::new();
        registry.insert(1, "a");
        registry.insert(2, "b");
        assert_eq!(registry.reset().len(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn shared_registry_is_usable_across_threads() {
        let shared: SharedRegistry<u32, u32> = SharedRegistry::new();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        shared.write().insert(t * 100 + i, i);
                        if i % 2 == 0 {
                            shared.remove(&(t * 100 + i));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.len(), 200);
    }
}
