//! Thread-safe LRU cache bounded by the byte cost of its values.

use crate::cache::list::{Entry, Handle, RecencyList};
use crate::cache::types::CacheConfig;
use crate::cache::{CacheStats, CacheValue};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// State guarded by the cache lock.
///
/// `index` and `list` form a bijection: every key in the index resolves to
/// exactly one entry in the list, and every list entry is indexed by its key.
/// `size` is the sum of the costs of all entries in the list.
struct Inner<V> {
    index: HashMap<String, Handle>,
    list: RecencyList<V>,
    size: u64,
    stats: CacheStats,
}

/// In-memory cache that evicts the least recently used entry once the total
/// byte cost of its values exceeds a fixed capacity.
///
/// Every operation runs under a single [`RwLock`]. `get` reorders the
/// recency list and therefore takes the write lock like `set`, `delete` and
/// `clear`; the read-only accessors share the read lock. Values are costed
/// with [`CacheValue::size`] before the lock is taken, and replaced or
/// evicted values are dropped after it is released.
///
/// # Example
///
/// ```
/// use lrucache::cache::LruCache;
///
/// let cache: LruCache<Vec<u8>> = LruCache::new(2048);
/// cache.set("a", vec![0u8; 1024]);
/// cache.set("b", vec![0u8; 1024]);
///
/// // Touch "a" so "b" becomes the eviction candidate
/// assert!(cache.get("a").is_some());
///
/// cache.set("c", vec![0u8; 1024]);
/// assert!(cache.contains("a"));
/// assert!(!cache.contains("b"));
/// assert_eq!(cache.size(), 2048);
/// ```
pub struct LruCache<V> {
    name: String,
    capacity: u64,
    inner: RwLock<Inner<V>>,
}

impl<V: CacheValue> LruCache<V> {
    /// Create a cache holding at most `capacity` bytes of values.
    pub fn new(capacity: u64) -> Self {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Create a cache from a [`CacheConfig`].
    pub fn with_config(config: CacheConfig) -> Self {
        tracing::debug!(
            cache = %config.name,
            capacity = config.capacity,
            "LRU cache created"
        );

        Self {
            name: config.name,
            capacity: config.capacity,
            inner: RwLock::new(Inner {
                index: HashMap::new(),
                list: RecencyList::new(),
                size: 0,
                stats: CacheStats::new(),
            }),
        }
    }

    /// Get a clone of the value for `key`, marking it most recently used.
    ///
    /// Returns `None` on a miss. Store large values behind an `Arc` to keep
    /// the clone cheap.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let mut inner = self.inner.write();

        let Some(handle) = inner.index.get(key).copied() else {
            inner.stats.record_miss();
            return None;
        };

        inner.list.move_to_front(handle);
        inner.stats.record_hit();
        Some(inner.list.get(handle).value.clone())
    }

    /// Store `value` under `key`, then evict least recently used entries
    /// until the cache fits its capacity.
    ///
    /// An existing entry keeps its slot: its value and cost are replaced and
    /// it becomes the most recently used entry. A value whose cost alone
    /// exceeds the capacity can never be resident, so it empties the cache
    /// exactly as inserting it and then evicting in LRU order would.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let cost = value.size();

        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let existing = inner.index.get(&key).copied();

        if cost > self.capacity {
            tracing::warn!(
                cache = %self.name,
                key = %key,
                cost,
                capacity = self.capacity,
                "Value exceeds cache capacity; cache will be emptied"
            );

            // The incoming value counts as evicted too, unless it replaced a
            // resident entry that is already part of the drained list
            let evicted = inner.list.len() as u64 + u64::from(existing.is_none());
            match existing {
                Some(_) => inner.stats.record_update(),
                None => inner.stats.record_insertion(),
            }
            inner.stats.record_evictions(evicted);

            let discarded = inner.list.clear();
            inner.index.clear();
            inner.size = 0;

            drop(guard);
            drop(discarded);
            drop(value);
            return;
        }

        // `size` excludes the incoming cost until eviction has made room for
        // it, so the running total never passes `capacity`
        let replaced = match existing {
            Some(handle) => {
                let entry = inner.list.get_mut(handle);
                inner.size -= entry.cost;
                entry.cost = cost;
                let old_value = std::mem::replace(&mut entry.value, value);

                inner.list.move_to_front(handle);
                inner.stats.record_update();
                Some(old_value)
            }
            None => {
                let handle = inner.list.push_front(Entry {
                    key: key.clone(),
                    value,
                    cost,
                });
                inner.index.insert(key, handle);
                inner.stats.record_insertion();
                None
            }
        };

        let evicted = self.evict_to_fit(inner, cost);
        inner.size += cost;

        if !evicted.is_empty() {
            tracing::debug!(
                cache = %self.name,
                evicted = evicted.len(),
                size = inner.size,
                capacity = self.capacity,
                "LRU eviction complete"
            );
        }

        drop(guard);
        drop(replaced);
        drop(evicted);
    }

    /// Remove `key` from the cache, returning its value.
    ///
    /// Does nothing and returns `None` if the key is not resident.
    pub fn delete(&self, key: &str) -> Option<V> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let handle = inner.index.remove(key)?;
        let entry = inner.list.remove(handle);
        inner.size -= entry.cost;
        inner.stats.record_deletion();

        Some(entry.value)
    }

    /// Remove every entry. Capacity and statistics are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.write();

        let released = inner.size;
        let entries = inner.list.len();
        let discarded = inner.list.clear();
        inner.index.clear();
        inner.size = 0;
        drop(inner);
        drop(discarded);

        tracing::debug!(
            cache = %self.name,
            entries,
            released_bytes = released,
            "LRU cache cleared"
        );
    }

    /// Maximum total cost of resident values, in bytes.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Current total cost of resident values, in bytes.
    pub fn size(&self) -> u64 {
        self.inner.read().size
    }

    /// Name used in log events.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.read().list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().list.is_empty()
    }

    /// Check whether `key` is resident without affecting its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().index.contains_key(key)
    }

    /// Resident keys ordered from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        let inner = self.inner.read();
        inner.list.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats.clone()
    }

    /// Pop entries off the back of the recency list until an incoming value
    /// of cost `incoming` fits, or only that value is left.
    ///
    /// The incoming entry must already sit at the front of the list with its
    /// cost excluded from `size`, and `incoming <= capacity` must hold. The
    /// evicted entries are returned so they can be dropped outside the lock.
    fn evict_to_fit(&self, inner: &mut Inner<V>, incoming: u64) -> Vec<Entry<V>> {
        let limit = self.capacity - incoming;
        let mut evicted = Vec::new();

        while inner.size > limit {
            debug_assert!(inner.list.len() > 1, "incoming entry must never be evicted");
            let Some(entry) = inner.list.pop_back() else {
                break;
            };

            inner.index.remove(&entry.key);
            inner.size -= entry.cost;

            tracing::trace!(
                cache = %self.name,
                key = %entry.key,
                cost = entry.cost,
                "Evicted LRU entry"
            );
            evicted.push(entry);
        }

        inner.stats.record_evictions(evicted.len() as u64);
        evicted
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("LruCache")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("size", &inner.size)
            .field("len", &inner.list.len())
            .finish()
    }
}
