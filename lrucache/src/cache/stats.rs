//! Cache statistics tracking.

/// Counters describing how a cache has been used.
///
/// Counters are updated under the same lock as the operation they describe,
/// so a snapshot taken through [`LruCache::stats`](crate::cache::LruCache::stats)
/// is always internally consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found a resident value.
    pub hits: u64,
    /// Lookups for a key that was not resident.
    pub misses: u64,
    /// `set` calls that created a new entry.
    pub insertions: u64,
    /// `set` calls that replaced the value of a resident key.
    pub updates: u64,
    /// Entries removed by the eviction loop.
    pub evictions: u64,
    /// Entries removed by an explicit `delete`.
    pub deletions: u64,
}

impl CacheStats {
    /// Create a zeroed statistics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit rate as a fraction in `[0.0, 1.0]`. Returns 0.0 if no lookups.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of `get` calls (hits + misses).
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    pub(crate) fn record_deletion(&mut self) {
        self.deletions += 1;
    }
}
