// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memo of derived aggregates keyed by group.

use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// A lazily populated, read-mostly cache of derived aggregates (e.g. box stats per
/// `engine-feature` key).
///
/// The owning figure controller is the only writer; values are computed on first request and
/// reused by later updates.
#[derive(Clone, Debug)]
pub struct StatsCache<K, V> {
    entries: HashMap<K, V>,
    misses: usize,
}

impl<K, V> Default for StatsCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            misses: 0,
        }
    }
}

impl<K: Eq + Hash, V> StatsCache<K, V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` has been computed.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times a value had to be computed.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Returns the cached value, computing it with `f` on first use.
    pub fn get_or_insert_with(&mut self, key: K, f: impl FnOnce() -> V) -> &V {
        let misses = &mut self.misses;
        self.entries.entry(key).or_insert_with(|| {
            *misses += 1;
            f()
        })
    }

    /// Like [`StatsCache::get_or_insert_with`] for fallible computations.
    ///
    /// Errors are not cached; the next request retries.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: K,
        f: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        match self.entries.entry(key) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                self.misses += 1;
                let value = f()?;
                Ok(e.insert(value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn values_are_computed_once_per_key() {
        let mut cache: StatsCache<String, f64> = StatsCache::new();
        let a = *cache.get_or_insert_with("comet-sibling-scores".into(), || 1.5);
        let b = *cache.get_or_insert_with("comet-sibling-scores".into(), || 99.0);
        assert_eq!((a, b), (1.5, 1.5), "second request is served from the cache");
        assert_eq!(cache.misses(), 1, "computed once");
    }

    #[test]
    fn errors_are_not_cached() {
        let mut cache: StatsCache<&str, f64> = StatsCache::new();
        let err: Result<&f64, &str> = cache.get_or_try_insert_with("k", || Err("boom"));
        assert!(err.is_err(), "error propagates");
        assert!(!cache.contains(&"k"), "nothing cached on error");
        let ok = cache.get_or_try_insert_with::<&str>("k", || Ok(2.0)).copied();
        assert_eq!(ok, Ok(2.0), "retry succeeds");
        assert_eq!(cache.misses(), 2, "both attempts computed");
    }
}
