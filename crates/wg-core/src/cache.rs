//! Verdict cache
//!
//! Maps the hash of a checked text to the verdict last computed for it. A
//! cache is only meaningful for the pair of patterns it was filled against,
//! so every list update starts a new one (see [`crate::lists::ListSnapshot`]).

use std::collections::{HashMap, VecDeque};

use crate::hash::TextHash;

/// Verdicts keyed by text hash, optionally bounded with LRU eviction.
#[derive(Debug, Default)]
pub struct ResultCache {
    capacity: Option<usize>,
    entries: HashMap<TextHash, bool>,
    order: VecDeque<TextHash>,
}

impl ResultCache {
    /// Unbounded cache. Grows until the next list update discards it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` entries. `None` means unbounded.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        let initial = capacity.unwrap_or(0).min(4096);
        Self {
            capacity,
            entries: HashMap::with_capacity(initial),
            order: VecDeque::with_capacity(if capacity.is_some() { initial } else { 0 }),
        }
    }

    pub fn get(&mut self, key: TextHash) -> Option<bool> {
        let verdict = *self.entries.get(&key)?;
        if self.capacity.is_some() {
            // Move to back (most recently used)
            self.order.retain(|k| *k != key);
            self.order.push_back(key);
        }
        Some(verdict)
    }

    pub fn put(&mut self, key: TextHash, verdict: bool) {
        let Some(capacity) = self.capacity else {
            self.entries.insert(key, verdict);
            return;
        };
        if capacity == 0 {
            return;
        }

        if self.entries.contains_key(&key) {
            self.order.retain(|k| *k != key);
        } else if self.entries.len() >= capacity {
            // Evict oldest
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
        self.entries.insert(key, verdict);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: i32) -> TextHash {
        TextHash(n)
    }

    #[test]
    fn test_get_put() {
        let mut cache = ResultCache::new();
        assert_eq!(cache.get(key(1)), None);
        cache.put(key(1), false);
        cache.put(key(2), true);
        assert_eq!(cache.get(key(1)), Some(false));
        assert_eq!(cache.get(key(2)), Some(true));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_put_overwrites() {
        let mut cache = ResultCache::new();
        cache.put(key(7), true);
        cache.put(key(7), false);
        assert_eq!(cache.get(key(7)), Some(false));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = ResultCache::with_capacity(Some(8));
        cache.put(key(1), true);
        cache.put(key(2), true);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(key(1)), None);
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut cache = ResultCache::new();
        for i in 0..10_000 {
            cache.put(key(i), i % 2 == 0);
        }
        assert_eq!(cache.len(), 10_000);
        assert_eq!(cache.get(key(0)), Some(true));
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let mut cache = ResultCache::with_capacity(Some(2));
        cache.put(key(1), true);
        cache.put(key(2), true);
        // Touch 1 so 2 becomes the eviction candidate.
        assert_eq!(cache.get(key(1)), Some(true));
        cache.put(key(3), false);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(key(2)), None);
        assert_eq!(cache.get(key(1)), Some(true));
        assert_eq!(cache.get(key(3)), Some(false));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = ResultCache::with_capacity(Some(0));
        cache.put(key(1), true);
        assert!(cache.is_empty());
    }
}
